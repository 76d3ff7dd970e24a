//! Aggregated per-letter mirror outcomes.

use super::MirrorOutcome;

/// Outcome of every dispatched subfolder job, sorted by letter.
#[derive(Debug, Clone, Default)]
pub struct MirrorReport {
    outcomes: Vec<(char, MirrorOutcome)>,
}

impl MirrorReport {
    pub fn from_outcomes(mut outcomes: Vec<(char, MirrorOutcome)>) -> Self {
        outcomes.sort_by_key(|(letter, _)| *letter);
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[(char, MirrorOutcome)] {
        &self.outcomes
    }

    /// Number of jobs dispatched.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    /// Letters whose mirror job did not complete.
    pub fn failed(&self) -> Vec<char> {
        self.outcomes
            .iter()
            .filter(|(_, o)| !o.is_success())
            .map(|(letter, _)| *letter)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_and_counted() {
        let report = MirrorReport::from_outcomes(vec![
            ('C', MirrorOutcome::Failed { code: Some(4) }),
            ('A', MirrorOutcome::Completed),
            ('B', MirrorOutcome::SpawnFailed("wget: not found".into())),
        ]);
        let letters: Vec<char> = report.outcomes().iter().map(|(l, _)| *l).collect();
        assert_eq!(letters, vec!['A', 'B', 'C']);
        assert_eq!(report.len(), 3);
        assert_eq!(report.completed(), 1);
        assert_eq!(report.failed(), vec!['B', 'C']);
    }
}
