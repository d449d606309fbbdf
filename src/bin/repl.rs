use clap::Parser;
use dice_expr::roll::{MarkdownStringifier, RollContext, SimpleStringifier, Stringify};
use dice_expr::Error;
use std::io::{self, BufRead, Write};

/// Roll dice expressions such as `4d6!`, `2d20adv` or `1+2d6*3`
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Expressions to roll; reads them line by line from stdin when none are given
    expressions: Vec<String>,

    /// Maximum number of dice a single expression may roll (0 for no limit)
    #[arg(long, default_value_t = 10_000)]
    max_rolls: usize,

    /// Print results as a Markdown list
    #[arg(long)]
    markdown: bool,

    /// Print only the total, without the dice that produced it
    #[arg(long)]
    flat: bool,
}

struct Repl {
    ctx: RollContext,
    stringifier: Box<dyn Stringify>,
    flat: bool,
}

impl Repl {
    fn new(cli: &Cli) -> Self {
        let max_rolls = (cli.max_rolls > 0).then_some(cli.max_rolls);
        let stringifier: Box<dyn Stringify> = if cli.markdown {
            Box::new(MarkdownStringifier::new())
        } else {
            Box::new(SimpleStringifier::new())
        };
        Self {
            ctx: RollContext::new(max_rolls, rand::thread_rng()),
            stringifier,
            flat: cli.flat,
        }
    }

    fn run(&mut self, input: &str) -> Result<String, Error> {
        self.ctx.reset();
        let expr = dice_expr::parse(input)?;
        let roll = self.ctx.eval(&expr)?;
        log::info!("{} rolled {} dice", input.trim(), self.ctx.rolls_made());
        Ok(if self.flat {
            self.stringifier.str_roll(&roll)
        } else {
            self.stringifier.stringify(&roll)
        })
    }

    fn print(&mut self, input: &str) -> bool {
        match self.run(input) {
            Ok(r) => {
                println!("{}", r);
                true
            }
            Err(why) => {
                eprintln!("Error: {}", why);
                false
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let mut repl = Repl::new(&cli);

    if !cli.expressions.is_empty() {
        let mut ok = true;
        for expr in &cli.expressions {
            ok &= repl.print(expr);
        }
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(line) = lines.next() {
        let line = line?;
        if !line.trim().is_empty() {
            repl.print(&line);
        }
        print!("> ");
        io::stdout().flush()?;
    }
    println!();
    Ok(())
}
