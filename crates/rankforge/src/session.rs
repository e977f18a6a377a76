use std::io::{BufRead, Write};

use anyhow::Result;
use rankforge_core::errors::ValidationError;
use rankforge_core::types::{
    parse_display_name, parse_ranks, Character, CharacterName, ClassPreset, HexColor,
};
use rankforge_engine::generate::Generator;

/// Result of one character-creation dialogue.
#[derive(Debug)]
pub enum Capture {
    Created(Character),
    Cancelled,
    EndOfInput,
}

/// Interactive menu over any line source. Owns the session's character list.
pub struct Session<'g, R, W> {
    input: R,
    out: W,
    generator: &'g Generator<'g>,
    characters: Vec<Character>,
}

impl<'g, R: BufRead, W: Write> Session<'g, R, W> {
    pub fn new(input: R, out: W, generator: &'g Generator<'g>) -> Self {
        Self {
            input,
            out,
            generator,
            characters: Vec::new(),
        }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Menu loop; returns on "Exit" or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "\nCharacter Builder Menu:")?;
            writeln!(self.out, "1. Create a new character")?;
            writeln!(self.out, "2. Generate character files")?;
            writeln!(self.out, "3. Exit")?;
            let Some(choice) = self.line("Enter your choice: ")? else {
                break;
            };
            match choice.trim() {
                "1" => match self.capture_character()? {
                    Capture::Created(character) => {
                        tracing::info!(character = %character.name(), "character added");
                        self.characters.push(character);
                    }
                    Capture::Cancelled => {
                        writeln!(self.out, "Character creation cancelled.")?;
                    }
                    Capture::EndOfInput => break,
                },
                "2" => self.generate()?,
                "3" => break,
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
        Ok(())
    }

    fn generate(&mut self) -> Result<()> {
        if self.characters.is_empty() {
            writeln!(self.out, "No characters to generate. Create one first.")?;
            return Ok(());
        }
        let reports = self.generator.generate_all(&self.characters);
        for report in &reports {
            writeln!(self.out, "{}", report.summary())?;
            for failure in &report.failures {
                writeln!(
                    self.out,
                    "  failed {}: {}",
                    failure.path.display(),
                    failure.message
                )?;
            }
        }
        writeln!(
            self.out,
            "Character files generated for {} characters.",
            reports.len()
        )?;
        Ok(())
    }

    /// Walk the user through every field, then ask for confirmation.
    pub fn capture_character(&mut self) -> Result<Capture> {
        let taken: Vec<String> = self
            .characters
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let Some(name) = self.ask(
            "Enter a name for your character (lowercase letters and underscores, max 30): ",
            |s| {
                let name = CharacterName::new(s)?;
                if taken.iter().any(|t| t == name.as_str()) {
                    return Err(ValidationError::DuplicateName(name.to_string()));
                }
                Ok(name)
            },
        )?
        else {
            return Ok(Capture::EndOfInput);
        };
        let Some(display_name) = self.ask(
            "Enter a display name for your character: ",
            parse_display_name,
        )?
        else {
            return Ok(Capture::EndOfInput);
        };
        let Some(text_color) = self.ask(
            "Enter a hex color code for your character's text color (e.g., #7fffd4 for an aquamarine color): ",
            HexColor::new,
        )?
        else {
            return Ok(Capture::EndOfInput);
        };
        let Some(secondary_color) = self.ask(
            "Enter a hex color code for your character's secondary color (e.g., #7fffd4 for an aquamarine color): ",
            HexColor::new,
        )?
        else {
            return Ok(Capture::EndOfInput);
        };

        writeln!(self.out, "Select a class for your character:")?;
        for (i, preset) in ClassPreset::ALL.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, preset.label())?;
        }
        let Some(preset) = self.ask("Enter your choice: ", ClassPreset::from_choice)? else {
            return Ok(Capture::EndOfInput);
        };
        let Some(ranks) = self.ask(
            "Enter the number of ranks for your character (5 or 6): ",
            parse_ranks,
        )?
        else {
            return Ok(Capture::EndOfInput);
        };

        let character = match Character::new(
            name,
            &display_name,
            text_color,
            secondary_color,
            ranks,
            preset.stats(),
        ) {
            Ok(c) => c,
            Err(e) => {
                writeln!(self.out, "Invalid character: {e}")?;
                return Ok(Capture::Cancelled);
            }
        };

        self.print_summary(&character, preset)?;
        let Some(answer) = self.line("Are these details correct? (y/n): ")? else {
            return Ok(Capture::EndOfInput);
        };
        if matches!(answer.trim(), "y" | "Y") {
            Ok(Capture::Created(character))
        } else {
            Ok(Capture::Cancelled)
        }
    }

    fn print_summary(&mut self, character: &Character, preset: ClassPreset) -> Result<()> {
        let class = character.class();
        writeln!(self.out, "\nCharacter Summary:")?;
        writeln!(self.out, "Name: {}", character.name())?;
        writeln!(self.out, "Display Name: {}", character.display_name())?;
        writeln!(self.out, "Text Color: {}", character.text_color())?;
        writeln!(self.out, "Secondary Color: {}", character.secondary_color())?;
        writeln!(self.out, "Class: {}", preset.label())?;
        writeln!(self.out, "Stats per Rank:")?;
        writeln!(self.out, "\tHealth: +{}", class.health_per_rank)?;
        writeln!(self.out, "\tArmor: +{}", class.armor_per_rank)?;
        writeln!(
            self.out,
            "\tMelee Damage: +{:.2}%",
            class.melee_damage_per_rank * 100.0
        )?;
        writeln!(
            self.out,
            "\tRanged Damage: +{:.2}%",
            class.ranged_damage_per_rank * 100.0
        )?;
        writeln!(
            self.out,
            "\tGeneral Damage: +{:.2}%",
            class.general_damage_per_rank * 100.0
        )?;
        writeln!(
            self.out,
            "\tDamage Resistance: +{:.2}%",
            class.damage_resistance_per_rank * 100.0
        )?;
        writeln!(self.out, "Number of Ranks: {}", character.ranks())?;
        Ok(())
    }

    /// Re-prompt until `parse` accepts the line. `None` on end of input.
    fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.line(question)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.out, "Invalid input: {e}. Please try again.")?,
            }
        }
    }

    /// Prompt and read one line without its terminator. `None` on end of input.
    fn line(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.out, "{question}")?;
        self.out.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankforge_core::config::GeneratorConfig;
    use std::io::Cursor;

    const HERO: &str = "test_hero\nTest Hero\n#7fffd4\n#aa00ff\n1\n5\ny\n";

    fn run_script(config: &GeneratorConfig, script: &str) -> (Vec<Character>, String) {
        let generator = Generator::new(config).unwrap();
        let mut out = Vec::new();
        let characters = {
            let mut session = Session::new(Cursor::new(script.to_string()), &mut out, &generator);
            session.run().unwrap();
            session.characters().to_vec()
        };
        (characters, String::from_utf8(out).unwrap())
    }

    fn temp_config(dir: &tempfile::TempDir) -> GeneratorConfig {
        GeneratorConfig {
            output_dir: dir.path().to_path_buf(),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn creates_character_from_valid_answers() {
        let dir = tempfile::tempdir().unwrap();
        let (characters, out) = run_script(&temp_config(&dir), &format!("1\n{HERO}3\n"));
        assert_eq!(characters.len(), 1);
        let c = &characters[0];
        assert_eq!(c.name().as_str(), "test_hero");
        assert_eq!(c.display_name(), "Test Hero");
        assert_eq!(c.ranks(), 5);
        assert_eq!(*c.class(), ClassPreset::Melee.stats());
        assert!(out.contains("Character Summary:"));
        assert!(out.contains("\tMelee Damage: +8.00%"));
    }

    #[test]
    fn invalid_fields_are_reprompted() {
        let dir = tempfile::tempdir().unwrap();
        let script = "1\nBad\n_bad\nfine_name\n\nFine\n7fffd4\n#7fffd400\n#7fffd4\n#ghijkl\n#000000\n9\n3\n4\n5\ny\n3\n";
        let (characters, out) = run_script(&temp_config(&dir), script);
        assert_eq!(characters.len(), 1);
        assert_eq!(*characters[0].class(), ClassPreset::Defense.stats());
        assert_eq!(characters[0].secondary_color().as_str(), "#000000");
        assert_eq!(out.matches("Invalid input:").count(), 8);
        assert!(out.contains("alpha channel"));
    }

    #[test]
    fn negative_confirmation_discards_character() {
        let dir = tempfile::tempdir().unwrap();
        let script = "1\ntest_hero\nTest Hero\n#7fffd4\n#aa00ff\n1\n5\nn\n3\n";
        let (characters, out) = run_script(&temp_config(&dir), script);
        assert!(characters.is_empty());
        assert!(out.contains("Character creation cancelled."));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "1\n{HERO}1\ntest_hero\nother_hero\nOther\n#111111\n#222222\n2\n6\ny\n3\n"
        );
        let (characters, out) = run_script(&temp_config(&dir), &script);
        assert_eq!(characters.len(), 2);
        assert_eq!(characters[1].name().as_str(), "other_hero");
        assert!(out.contains("already exists"));
    }

    #[test]
    fn generate_writes_every_character() {
        let dir = tempfile::tempdir().unwrap();
        let (_, out) = run_script(&temp_config(&dir), &format!("2\n1\n{HERO}2\n3\n"));
        assert!(out.contains("No characters to generate."));
        assert!(out.contains("Character files generated for 1 characters."));
        assert!(dir.path().join("powers/flavors/test_hero/0star/evo.json").is_file());
        assert!(dir.path().join("origins/ranks/test_hero/5star.json").is_file());
    }

    #[test]
    fn unknown_menu_choice_and_eof_end_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let (characters, out) = run_script(&temp_config(&dir), "9\n1\ntest_hero\n");
        assert!(characters.is_empty());
        assert!(out.contains("Invalid choice. Please try again."));
    }
}
