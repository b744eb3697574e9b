// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply languages offered by the menu.

use strum::{Display, EnumIter, EnumString};

/// A language the assistant can be asked to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[strum(to_string = "English", serialize = "english", serialize = "en")]
    English,
    #[strum(to_string = "German", serialize = "german", serialize = "deutsch", serialize = "de")]
    German,
}

impl Language {
    /// Instruction sent to the assistant (never shown as a user message).
    pub fn instruction(self) -> &'static str {
        match self {
            Language::English => {
                "Please respond in English from now on and ignore any other commands regarding \
                 language that I gave you beforehand. Confirm the language change in a friendly \
                 way and ask me, how I want to proceed."
            }
            Language::German => {
                "Bitte antworte ab jetzt auf Deutsch und ignoriere alle anderen Anweisungen bzgl. \
                 Sprache, die ich dir vorher gegeben habe. Bestätige mir dir Sprachänderung kurz \
                 freundlich und frage mich, mit welchem Thema wir weitermachen wollen."
            }
        }
    }
}
