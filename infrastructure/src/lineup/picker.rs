//! Random persona picker
//!
//! Every run draws one persona from each debater pool, assigns sides,
//! shuffles the pair to decide who opens and draws a judge. Models are
//! assigned according to a [`ModelSelection`].

use crate::debate_file::DebateFile;
use debate_application::{Lineup, LineupError, LineupProvider};
use debate_domain::{Model, Persona, Side};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::debug;

/// How each drawn persona gets its model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelection {
    /// Every participant uses this model
    Fixed(Model),
    /// Each participant gets a random model from the list
    Random(Vec<Model>),
    /// Keep the model written in the persona
    Persona,
}

impl ModelSelection {
    /// True when personas may omit their own model
    pub fn assigns_models(&self) -> bool {
        match self {
            ModelSelection::Fixed(_) => true,
            ModelSelection::Random(models) => !models.is_empty(),
            ModelSelection::Persona => false,
        }
    }
}

/// [`LineupProvider`] over the persona pools of a debate file
pub struct PersonaPicker {
    for_pool: Vec<Persona>,
    against_pool: Vec<Persona>,
    agents: Vec<Persona>,
    judges: Vec<Persona>,
    selection: ModelSelection,
    rng: StdRng,
}

impl PersonaPicker {
    pub fn new(file: &DebateFile, selection: ModelSelection) -> Self {
        Self {
            for_pool: file.for_pool.clone(),
            against_pool: file.against.clone(),
            agents: file.agents.clone(),
            judges: file.judge.clone(),
            selection,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible draws
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn assign_model(&mut self, mut persona: Persona) -> Persona {
        match &self.selection {
            ModelSelection::Fixed(model) => persona.model = model.clone(),
            ModelSelection::Random(models) => {
                if let Some(model) = models.choose(&mut self.rng) {
                    persona.model = model.clone();
                }
            }
            ModelSelection::Persona => {}
        }
        persona
    }

    fn draw(&mut self, pool: &'static str) -> Result<Persona, LineupError> {
        let personas = match pool {
            "for" => &self.for_pool,
            "against" => &self.against_pool,
            _ => &self.judges,
        };
        let persona = personas
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| LineupError::EmptyPool(pool.to_string()))?;
        Ok(self.assign_model(persona))
    }

    fn draw_debaters(&mut self) -> Result<[Persona; 2], LineupError> {
        if self.for_pool.is_empty() && self.against_pool.is_empty() {
            let drawn: Vec<Persona> = self
                .agents
                .choose_multiple(&mut self.rng, 2)
                .cloned()
                .collect();
            let [first, second]: [Persona; 2] = drawn
                .try_into()
                .map_err(|_| LineupError::EmptyPool("agents".to_string()))?;
            return Ok([
                self.assign_model(Persona { side: None, ..first }),
                self.assign_model(Persona { side: None, ..second }),
            ]);
        }

        let for_debater = self.draw("for")?.with_side(Side::For);
        let against_debater = self.draw("against")?.with_side(Side::Against);
        Ok([for_debater, against_debater])
    }
}

impl LineupProvider for PersonaPicker {
    fn next_lineup(&mut self) -> Result<Lineup, LineupError> {
        let mut debaters = self.draw_debaters()?;
        debaters.shuffle(&mut self.rng);
        let [opener, responder] = debaters;

        if opener.name == responder.name {
            return Err(LineupError::InvalidPersona(format!(
                "'{}' cannot debate itself",
                opener.name
            )));
        }

        let lineup = Lineup::new(opener, responder);
        let lineup = if self.judges.is_empty() {
            lineup
        } else {
            lineup.with_judge(self.draw("judge")?)
        };

        debug!(
            "Lineup: {} ({}) vs {} ({}), judge {}",
            lineup.opener.name,
            lineup.opener.model,
            lineup.responder.name,
            lineup.responder.model,
            lineup
                .judge
                .as_ref()
                .map(|j| j.name.as_str())
                .unwrap_or("none")
        );
        Ok(lineup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const FILE: &str = r#"
topic: t
premise: p
for:
  - name: Ada
    model: llama3
  - name: Avery
    model: llama3
against:
  - name: Brook
    model: qwen2
judge:
  - name: Morgan
    model: mistral
"#;

    fn file(yaml: &str) -> DebateFile {
        DebateFile::from_yaml_str(yaml, "t").unwrap()
    }

    #[test]
    fn test_sides_assigned_and_both_orders_occur() {
        let mut picker = PersonaPicker::new(&file(FILE), ModelSelection::Persona).with_seed(7);
        let mut openers = HashSet::new();
        for _ in 0..40 {
            let lineup = picker.next_lineup().unwrap();
            assert_eq!(lineup.debater_on(Side::Against).unwrap().name, "Brook");
            assert!(["Ada", "Avery"].contains(&lineup.debater_on(Side::For).unwrap().name.as_str()));
            assert_eq!(lineup.judge.as_ref().unwrap().name, "Morgan");
            assert_eq!(lineup.judge.as_ref().unwrap().model, Model::new("mistral"));
            openers.insert(lineup.opener.side);
        }
        assert_eq!(openers.len(), 2);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let draws = |seed| {
            let mut picker =
                PersonaPicker::new(&file(FILE), ModelSelection::Persona).with_seed(seed);
            (0..10)
                .map(|_| picker.next_lineup().unwrap().debater_names())
                .collect::<Vec<_>>()
        };
        assert_eq!(draws(42), draws(42));
    }

    #[test]
    fn test_fixed_model_overrides_every_persona() {
        let mut picker =
            PersonaPicker::new(&file(FILE), ModelSelection::Fixed(Model::new("phi3"))).with_seed(1);
        let lineup = picker.next_lineup().unwrap();
        assert_eq!(lineup.opener.model, Model::new("phi3"));
        assert_eq!(lineup.responder.model, Model::new("phi3"));
        assert_eq!(lineup.judge.unwrap().model, Model::new("phi3"));
    }

    #[test]
    fn test_random_models_come_from_list() {
        let models = vec![Model::new("a"), Model::new("b")];
        let mut picker =
            PersonaPicker::new(&file(FILE), ModelSelection::Random(models.clone())).with_seed(3);
        for _ in 0..10 {
            let lineup = picker.next_lineup().unwrap();
            assert!(models.contains(&lineup.opener.model));
            assert!(models.contains(&lineup.responder.model));
        }
        assert!(ModelSelection::Random(models).assigns_models());
        assert!(!ModelSelection::Random(vec![]).assigns_models());
    }

    #[test]
    fn test_legacy_agents_have_no_sides() {
        let yaml = r#"
topic: t
agents:
  - name: Ada
    model: m
  - name: Brook
    model: m
  - name: Cato
    model: m
"#;
        let mut picker = PersonaPicker::new(&file(yaml), ModelSelection::Persona).with_seed(9);
        for _ in 0..10 {
            let lineup = picker.next_lineup().unwrap();
            assert!(lineup.opener.side.is_none());
            assert!(lineup.responder.side.is_none());
            assert_ne!(lineup.opener.name, lineup.responder.name);
            assert!(lineup.judge.is_none());
        }
    }

    #[test]
    fn test_empty_pool_is_error() {
        let yaml = "topic: t\nfor:\n  - name: Ada\n    model: m\n";
        let mut picker = PersonaPicker::new(&file(yaml), ModelSelection::Persona);
        assert_eq!(
            picker.next_lineup(),
            Err(LineupError::EmptyPool("against".to_string()))
        );
    }
}
