use restaurant_profile::{Language, MemoryPage, ProfileRenderer};

pub(super) const HELP: &str = "Usage: es | en | lang <es|en> | show | quit";

#[derive(Debug, PartialEq)]
pub(super) enum PreviewAction {
    Switch(Language),
    Show,
    Quit,
}

#[derive(Debug, PartialEq)]
pub(super) enum Outcome {
    Redraw,
    Quit,
}

impl PreviewAction {
    //  es | en | lang <code> | show | quit
    pub(super) fn new(args: &[&str]) -> Result<Self, &'static str> {
        let Some(cmd) = args.first() else {
            return Err("empty command");
        };

        match *cmd {
            "lang" => {
                let Some(code) = args.get(1) else {
                    return Err("too less argument");
                };
                Language::from_code(code)
                    .map(Self::Switch)
                    .ok_or("unsupported language")
            }
            "show" => Ok(Self::Show),
            "quit" | "exit" => Ok(Self::Quit),
            code => Language::from_code(code)
                .map(Self::Switch)
                .ok_or("unexpected command"),
        }
    }

    // consumes the action
    pub(super) fn run(self, renderer: &mut ProfileRenderer<MemoryPage>) -> Outcome {
        match self {
            Self::Switch(lang) => {
                // go through the page's controls like a click would
                let index = renderer
                    .mount()
                    .controls()
                    .iter()
                    .position(|control| control.code == lang.code());
                match index {
                    Some(index) => {
                        renderer.click(index);
                    }
                    None => renderer.select(lang),
                }
                Outcome::Redraw
            }
            Self::Show => Outcome::Redraw,
            Self::Quit => Outcome::Quit,
        }
    }
}
