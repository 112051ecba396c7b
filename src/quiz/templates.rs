use rand::seq::SliceRandom;
use rand::Rng;

use crate::periodic::{ElementRecord, FieldKey};

/// How many templates a quiz draws when nothing else is configured.
pub const DEFAULT_QUESTIONS_PER_QUIZ: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// "easy" and "medium" map to their tiers; anything else means every template.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Tiers are cumulative: medium includes easy, hard includes everything.
    pub fn admits(&self, level: Difficulty) -> bool {
        level <= *self
    }
}

/// What to do with a template whose field the target element doesn't have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingAnswerPolicy {
    /// Keep it; the correct answer reads "not available".
    #[default]
    Placeholder,
    /// Leave it out of the selection.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTemplate {
    /// Prompt with a `{name}` placeholder for the element name.
    pub prompt: String,
    pub field: FieldKey,
    pub level: Difficulty,
}

impl QuestionTemplate {
    pub fn new(prompt: &str, field: FieldKey, level: Difficulty) -> Self {
        Self {
            prompt: prompt.to_string(),
            field,
            level,
        }
    }

    pub fn prompt_for(&self, element: &ElementRecord) -> String {
        self.prompt.replace("{name}", &element.name)
    }
}

/// The fixed catalog of question templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    templates: Vec<QuestionTemplate>,
}

impl QuestionBank {
    pub fn new(templates: Vec<QuestionTemplate>) -> Self {
        Self { templates }
    }

    /// Nine questions, three per tier.
    pub fn standard() -> Self {
        use Difficulty::*;
        Self::new(vec![
            QuestionTemplate::new("What is the atomic number of {name}?", FieldKey::Number, Easy),
            QuestionTemplate::new("What is the chemical symbol of {name}?", FieldKey::Symbol, Easy),
            QuestionTemplate::new("What is the category of {name}?", FieldKey::Category, Easy),
            QuestionTemplate::new("Which group does {name} belong to?", FieldKey::XPos, Medium),
            QuestionTemplate::new("In which period is {name} located?", FieldKey::YPos, Medium),
            QuestionTemplate::new("State of {name} at room temperature?", FieldKey::Phase, Medium),
            QuestionTemplate::new("What is the atomic mass of {name}?", FieldKey::AtomicMass, Hard),
            QuestionTemplate::new("What is the density of {name}?", FieldKey::Density, Hard),
            QuestionTemplate::new("Boiling point of {name}?", FieldKey::Boil, Hard),
        ])
    }

    /// Templates a quiz at `difficulty` may draw from, in catalog order.
    pub fn eligible(&self, difficulty: Difficulty) -> Vec<&QuestionTemplate> {
        self.templates
            .iter()
            .filter(|t| difficulty.admits(t.level))
            .collect()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::standard()
    }
}

/// Picks up to `target` distinct templates for a quiz about `element`.
///
/// The eligible templates are shuffled and the first
/// `min(target, eligible)` are taken, so no template is picked twice. An
/// under-filled bank gives a shorter list, possibly an empty one.
pub fn select_templates<'a, R: Rng + ?Sized>(
    bank: &'a QuestionBank,
    difficulty: Difficulty,
    target: usize,
    element: &ElementRecord,
    policy: MissingAnswerPolicy,
    rng: &mut R,
) -> Vec<&'a QuestionTemplate> {
    let mut eligible = bank.eligible(difficulty);
    if policy == MissingAnswerPolicy::Skip {
        eligible.retain(|t| element.field(t.field).is_some());
    }

    eligible.shuffle(rng);
    eligible.truncate(target);
    log::debug!(
        "Selected {} {} templates for {}: {:?}",
        eligible.len(),
        difficulty.as_str(),
        element.symbol,
        eligible.iter().map(|t| t.field.as_str()).collect::<Vec<_>>()
    );
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periodic::fixtures;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn iron() -> ElementRecord {
        fixtures::sample_table().find_by_symbol("Fe").unwrap().clone()
    }

    #[test]
    fn parses_difficulty_labels() {
        assert_eq!(Difficulty::from_label("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from_label(" Medium "), Difficulty::Medium);
        assert_eq!(Difficulty::from_label("hard"), Difficulty::Hard);
        assert_eq!(Difficulty::from_label("nightmare"), Difficulty::Hard);
        assert_eq!(Difficulty::from_label(""), Difficulty::Hard);
    }

    #[test]
    fn tiers_are_cumulative() {
        let bank = QuestionBank::standard();
        let easy: HashSet<_> = bank.eligible(Difficulty::Easy).into_iter().map(|t| t.field).collect();
        let medium: HashSet<_> = bank.eligible(Difficulty::Medium).into_iter().map(|t| t.field).collect();
        let hard: HashSet<_> = bank.eligible(Difficulty::Hard).into_iter().map(|t| t.field).collect();

        assert_eq!(easy.len(), 3);
        assert_eq!(medium.len(), 6);
        assert_eq!(hard.len(), 9);
        assert!(easy.is_subset(&medium));
        assert!(medium.is_subset(&hard));
    }

    #[test]
    fn easy_selection_never_contains_harder_templates() {
        let bank = QuestionBank::standard();
        let fe = iron();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_templates(
                &bank,
                Difficulty::Easy,
                DEFAULT_QUESTIONS_PER_QUIZ,
                &fe,
                MissingAnswerPolicy::Placeholder,
                &mut rng,
            );
            assert_eq!(picked.len(), 3);
            assert!(picked.iter().all(|t| t.level == Difficulty::Easy));
        }
    }

    #[test]
    fn selection_is_capped_and_distinct() {
        let bank = QuestionBank::standard();
        let fe = iron();
        for difficulty in Difficulty::ALL {
            for target in 0..12 {
                let mut rng = StdRng::seed_from_u64(target as u64);
                let picked = select_templates(
                    &bank,
                    difficulty,
                    target,
                    &fe,
                    MissingAnswerPolicy::Placeholder,
                    &mut rng,
                );
                let eligible = bank.eligible(difficulty).len();
                assert_eq!(picked.len(), target.min(eligible));

                for (i, a) in picked.iter().enumerate() {
                    for b in &picked[i + 1..] {
                        assert!(!std::ptr::eq(*a, *b));
                    }
                }
            }
        }
    }

    #[test]
    fn selection_order_varies_with_the_rng() {
        let bank = QuestionBank::standard();
        let fe = iron();
        let orders: HashSet<Vec<FieldKey>> = (0..20)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                select_templates(&bank, Difficulty::Hard, 9, &fe, MissingAnswerPolicy::Placeholder, &mut rng)
                    .into_iter()
                    .map(|t| t.field)
                    .collect()
            })
            .collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn missing_fields_follow_the_policy() {
        let bank = QuestionBank::standard();
        let bare = fixtures::bare_element();
        let mut rng = StdRng::seed_from_u64(7);

        let kept = select_templates(&bank, Difficulty::Hard, 9, &bare, MissingAnswerPolicy::Placeholder, &mut rng);
        assert_eq!(kept.len(), 9);

        let skipped = select_templates(&bank, Difficulty::Hard, 9, &bare, MissingAnswerPolicy::Skip, &mut rng);
        let fields: HashSet<_> = skipped.iter().map(|t| t.field).collect();
        assert_eq!(fields, HashSet::from([FieldKey::Number, FieldKey::Symbol]));
    }

    #[test]
    fn empty_bank_selects_nothing() {
        let bank = QuestionBank::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_templates(&bank, Difficulty::Hard, 5, &iron(), MissingAnswerPolicy::Placeholder, &mut rng);
        assert!(picked.is_empty());
    }

    #[test]
    fn prompt_names_the_element() {
        let template = QuestionTemplate::new("Boiling point of {name}?", FieldKey::Boil, Difficulty::Hard);
        assert_eq!(template.prompt_for(&iron()), "Boiling point of Iron?");
    }
}
