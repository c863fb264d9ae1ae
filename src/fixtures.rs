#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    use confique::Config;
    use serde::{Deserialize, Serialize};

    use crate::binding::{EnvConfig, FieldMut};
    use crate::prompt::{ChoicePrompt, PromptError, Prompter, TextPrompt};

    /// The shape used throughout the editor tests: plain, defaulted, hidden,
    /// masked and boolean fields.
    #[derive(Config, Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
    pub struct EditConfig {
        /// First string.
        #[config(env = "V_S1")]
        pub s1: String,

        #[config(env = "V_S2", default = "Maybe")]
        pub s2: String,

        #[config(env = "V_S3")]
        pub s3: String,

        #[config(env = "V_S4", default = "shush")]
        pub s4: String,

        #[config(env = "V_S5")]
        pub s5: String,

        #[config(env = "YESNO", default = true)]
        pub b6: bool,
    }

    impl EnvConfig for EditConfig {
        const SECRETS: &'static [(&'static str, &'static str)] =
            &[("s3", "true"), ("s4", "mask"), ("s5", "hide")];

        fn field_mut(&mut self, field: &str) -> Option<FieldMut<'_>> {
            Some(match field {
                "s1" => (&mut self.s1).into(),
                "s2" => (&mut self.s2).into(),
                "s3" => (&mut self.s3).into(),
                "s4" => (&mut self.s4).into(),
                "s5" => (&mut self.s5).into(),
                "b6" => (&mut self.b6).into(),
                _ => return None,
            })
        }
    }

    /// One bound field per supported kind, plus an optional one.
    #[derive(Config, Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
    pub struct KindsConfig {
        #[config(env = "K_S")]
        pub s: String,
        #[config(env = "K_B")]
        pub b: bool,
        #[config(env = "K_F32")]
        pub f32v: f32,
        #[config(env = "K_F64")]
        pub f64v: f64,
        #[config(env = "K_I8")]
        pub i8v: i8,
        #[config(env = "K_I16")]
        pub i16v: i16,
        #[config(env = "K_I32")]
        pub i32v: i32,
        #[config(env = "K_I64")]
        pub i64v: i64,
        #[config(env = "K_ISIZE")]
        pub isizev: isize,
        #[config(env = "K_U8")]
        pub u8v: u8,
        #[config(env = "K_U16")]
        pub u16v: u16,
        #[config(env = "K_U32")]
        pub u32v: u32,
        #[config(env = "K_U64")]
        pub u64v: u64,
        #[config(env = "K_USIZE")]
        pub usizev: usize,
        #[config(env = "K_OPT")]
        pub opt: Option<String>,
    }

    impl EnvConfig for KindsConfig {
        fn field_mut(&mut self, field: &str) -> Option<FieldMut<'_>> {
            Some(match field {
                "s" => (&mut self.s).into(),
                "b" => (&mut self.b).into(),
                "f32v" => (&mut self.f32v).into(),
                "f64v" => (&mut self.f64v).into(),
                "i8v" => (&mut self.i8v).into(),
                "i16v" => (&mut self.i16v).into(),
                "i32v" => (&mut self.i32v).into(),
                "i64v" => (&mut self.i64v).into(),
                "isizev" => (&mut self.isizev).into(),
                "u8v" => (&mut self.u8v).into(),
                "u16v" => (&mut self.u16v).into(),
                "u32v" => (&mut self.u32v).into(),
                "u64v" => (&mut self.u64v).into(),
                "usizev" => (&mut self.usizev).into(),
                _ => return None,
            })
        }
    }

    /// Fields that must not show up as editable items.
    #[derive(Config, Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
    pub struct GuardedConfig {
        #[config(default = "plain")]
        pub untagged: String,

        #[config(env = "GUARDED_VISIBLE")]
        pub visible: String,

        #[serde(skip)]
        #[config(env = "GUARDED_INTERNAL", default = "internal")]
        pub internal: String,

        #[config(nested)]
        pub section: SectionConfig,
    }

    impl EnvConfig for GuardedConfig {
        fn field_mut(&mut self, field: &str) -> Option<FieldMut<'_>> {
            match field {
                "visible" => Some((&mut self.visible).into()),
                _ => None,
            }
        }
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
    pub struct SectionConfig {
        #[config(env = "GUARDED_SECTION_URL")]
        pub url: Option<String>,
    }

    #[test]
    fn edit_config_requires_unset_fields() {
        // s1, s3 and s5 have neither a default nor an Option type.
        assert!(EditConfig::builder().load().is_err());
    }

    // -- Process environment ----------------------------------------------------

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that read or write the real process environment.
    pub fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // -- Scripted prompter ------------------------------------------------------

    /// A prompt as the editor asked it.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Asked {
        Text(TextPrompt),
        Choice(ChoicePrompt),
    }

    impl Asked {
        pub fn label(&self) -> &str {
            match self {
                Asked::Text(p) => &p.label,
                Asked::Choice(p) => &p.label,
            }
        }

        pub fn text(&self) -> &TextPrompt {
            match self {
                Asked::Text(p) => p,
                Asked::Choice(p) => panic!("expected a text prompt, got choice {}", p.label),
            }
        }

        pub fn choice(&self) -> &ChoicePrompt {
            match self {
                Asked::Choice(p) => p,
                Asked::Text(p) => panic!("expected a choice prompt, got text {}", p.label),
            }
        }
    }

    /// Answers prompts from a script and records every prompt it was shown.
    ///
    /// Text answers are keyed by the index of the text prompt (0-based, counting
    /// only text prompts); unscripted text prompts keep their default. Choice
    /// prompts keep their preselection unless scripted.
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        pub asked: Vec<Asked>,
        text_answers: HashMap<usize, String>,
        choice_answers: HashMap<usize, usize>,
        fail_at: Option<usize>,
        texts: usize,
        choices: usize,
    }

    impl ScriptedPrompter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn answer_text(mut self, index: usize, answer: &str) -> Self {
            self.text_answers.insert(index, answer.to_string());
            self
        }

        pub fn answer_choice(mut self, index: usize, option: usize) -> Self {
            self.choice_answers.insert(index, option);
            self
        }

        /// Fail with [`PromptError::Closed`] on the `index`-th prompt overall.
        pub fn fail_at(mut self, index: usize) -> Self {
            self.fail_at = Some(index);
            self
        }

        pub fn text_prompts(&self) -> Vec<&TextPrompt> {
            self.asked
                .iter()
                .filter_map(|a| match a {
                    Asked::Text(p) => Some(p),
                    Asked::Choice(_) => None,
                })
                .collect()
        }

        fn check_failure(&self) -> Result<(), PromptError> {
            if self.fail_at == Some(self.asked.len() - 1) {
                return Err(PromptError::Closed);
            }
            Ok(())
        }
    }

    impl Prompter for ScriptedPrompter {
        fn run_text(&mut self, prompt: &TextPrompt) -> Result<String, PromptError> {
            self.asked.push(Asked::Text(prompt.clone()));
            self.check_failure()?;
            let index = self.texts;
            self.texts += 1;
            let entered = self.text_answers.get(&index).cloned().unwrap_or_default();
            Ok(prompt.resolve(&entered))
        }

        fn run_choice(&mut self, prompt: &ChoicePrompt) -> Result<(usize, String), PromptError> {
            self.asked.push(Asked::Choice(prompt.clone()));
            self.check_failure()?;
            let index = self.choices;
            self.choices += 1;
            let picked = self
                .choice_answers
                .get(&index)
                .copied()
                .unwrap_or(prompt.selected);
            Ok((picked, prompt.options[picked].clone()))
        }
    }
}
