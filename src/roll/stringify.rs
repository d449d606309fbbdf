use super::tree::Roll;

/// Renders a [Roll] as one line per result, nesting the dice that contributed
/// to it two spaces deeper.
pub trait Stringify {
    /// The line for `roll` alone, without its provenance.
    fn str_roll(&mut self, roll: &Roll) -> String {
        roll.to_string()
    }

    fn stringify(&mut self, roll: &Roll) -> String {
        let mut ret = self.str_roll(roll);
        for child in roll.child_dice() {
            for line in self.stringify(child).lines() {
                ret.push_str("\n  ");
                ret.push_str(line);
            }
        }
        ret.trim_end().to_string()
    }
}

#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for SimpleStringifier {}

/// Emits a nested Markdown list with totals in code spans.
#[derive(Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for MarkdownStringifier {
    fn str_roll(&mut self, roll: &Roll) -> String {
        let mut ret = format!("- {} = `{}`", roll.source(), roll.value());
        if !roll.rolls().is_empty() {
            ret.push_str(&format!(" {:?}", roll.rolls()));
        }
        ret
    }
}
