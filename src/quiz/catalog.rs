//! Built-in question sets: the pool the backend is seeded with and the small
//! backup set a client falls back to when the backend cannot be reached.

use crate::quiz::question::{Difficulty, OPTION_COUNT, Question};

type Entry = (&'static str, [&'static str; OPTION_COUNT], usize, Difficulty);

const SEED_POOL: [Entry; 20] = [
    (
        "Which team has won the most UEFA Champions League titles?",
        ["Real Madrid", "Barcelona", "Bayern Munich", "Liverpool"],
        0,
        Difficulty::Easy,
    ),
    (
        "Who is the all-time top scorer in the UEFA Champions League?",
        ["Lionel Messi", "Cristiano Ronaldo", "Robert Lewandowski", "Karim Benzema"],
        1,
        Difficulty::Easy,
    ),
    (
        "In which city was the first European Cup final played in 1956?",
        ["Paris", "Madrid", "London", "Rome"],
        0,
        Difficulty::Medium,
    ),
    (
        "Which player has won the most Champions League titles?",
        ["Cristiano Ronaldo", "Paco Gento", "Lionel Messi", "Paolo Maldini"],
        1,
        Difficulty::Medium,
    ),
    (
        "In which season was the European Cup rebranded as the UEFA Champions League?",
        ["1990/91", "1991/92", "1992/93", "1995/96"],
        2,
        Difficulty::Medium,
    ),
    (
        "Which club won the first European Cup in 1956?",
        ["Real Madrid", "Benfica", "AC Milan", "Bayern Munich"],
        0,
        Difficulty::Medium,
    ),
    (
        "Which team has appeared in the most European Cup/Champions League finals?",
        ["Real Madrid", "Bayern Munich", "AC Milan", "Liverpool"],
        0,
        Difficulty::Medium,
    ),
    (
        "Who scored the winning goal for Chelsea in the 2012 Champions League final?",
        ["Didier Drogba", "Frank Lampard", "Fernando Torres", "Juan Mata"],
        0,
        Difficulty::Medium,
    ),
    (
        "Which player scored the fastest goal in Champions League history?",
        ["Roy Makaay", "Alessandro Del Piero", "Raúl", "David Alaba"],
        0,
        Difficulty::Hard,
    ),
    (
        "Which team completed the treble (domestic league, domestic cup, and Champions League) in the 1998-99 season?",
        ["Manchester United", "Bayern Munich", "Barcelona", "Inter Milan"],
        0,
        Difficulty::Medium,
    ),
    (
        "Which was the first team to win the Champions League undefeated?",
        ["Manchester United", "Barcelona", "AC Milan", "Ajax"],
        2,
        Difficulty::Hard,
    ),
    (
        "Who is the only player to win the Champions League with three different clubs?",
        ["Clarence Seedorf", "Cristiano Ronaldo", "Zlatan Ibrahimović", "Thiago Alcântara"],
        0,
        Difficulty::Hard,
    ),
    (
        "Which team came back from 3-0 down to win the 2005 Champions League final?",
        ["Liverpool", "Real Madrid", "Barcelona", "AC Milan"],
        0,
        Difficulty::Medium,
    ),
    (
        "Who scored Real Madrid's 93rd-minute equalizing goal in the 2014 Champions League final?",
        ["Cristiano Ronaldo", "Gareth Bale", "Sergio Ramos", "Karim Benzema"],
        2,
        Difficulty::Hard,
    ),
    (
        "Which manager has won the most Champions League titles?",
        ["Carlo Ancelotti", "Alex Ferguson", "Pep Guardiola", "José Mourinho"],
        0,
        Difficulty::Medium,
    ),
    (
        "Which team beat Barcelona 8-2 in the 2020 Champions League quarter-finals?",
        ["Bayern Munich", "Liverpool", "PSG", "Manchester City"],
        0,
        Difficulty::Easy,
    ),
    (
        "Who was the first English player to win the Champions League with a foreign club?",
        ["Steve McManaman", "David Beckham", "Owen Hargreaves", "Gary Lineker"],
        0,
        Difficulty::Hard,
    ),
    (
        "Which goalkeeper holds the record for most clean sheets in Champions League history?",
        ["Iker Casillas", "Gianluigi Buffon", "Manuel Neuer", "Petr Čech"],
        0,
        Difficulty::Medium,
    ),
    (
        "Which was the first team to retain the Champions League in its modern format?",
        ["AC Milan", "Barcelona", "Real Madrid", "Manchester United"],
        2,
        Difficulty::Medium,
    ),
    (
        "Which team won the Champions League in 2018, 2016, and 2017?",
        ["Barcelona", "Real Madrid", "Liverpool", "Bayern Munich"],
        1,
        Difficulty::Easy,
    ),
];

const BACKUP_SET: [Entry; 5] = [
    (
        "Which team has won the most UEFA Champions League titles?",
        ["Real Madrid", "Barcelona", "Bayern Munich", "Liverpool"],
        0,
        Difficulty::Easy,
    ),
    (
        "Who is the all-time top scorer in the UEFA Champions League?",
        ["Lionel Messi", "Cristiano Ronaldo", "Robert Lewandowski", "Karim Benzema"],
        1,
        Difficulty::Easy,
    ),
    (
        "Which player has won the most Champions League titles?",
        ["Cristiano Ronaldo", "Paco Gento", "Lionel Messi", "Paolo Maldini"],
        1,
        Difficulty::Medium,
    ),
    (
        "In which season was the European Cup rebranded as the UEFA Champions League?",
        ["1990/91", "1991/92", "1992/93", "1995/96"],
        2,
        Difficulty::Medium,
    ),
    (
        "Which club won the first European Cup in 1956?",
        ["Real Madrid", "Benfica", "AC Milan", "Bayern Munich"],
        0,
        Difficulty::Medium,
    ),
];

fn build(entries: &[Entry]) -> Vec<Question> {
    entries
        .iter()
        .zip(1..)
        .map(|((prompt, options, correct, difficulty), id)| {
            Question::builtin(id, prompt, *options, *correct, *difficulty)
        })
        .collect()
}

/// Pool the repository is seeded with when no configuration overrides it.
pub fn default_questions() -> Vec<Question> {
    build(&SEED_POOL)
}

/// Fixed local set used when fetching questions fails.
pub fn backup_questions() -> Vec<Question> {
    build(&BACKUP_SET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_are_well_formed() {
        for question in default_questions().iter().chain(backup_questions().iter()) {
            assert!(question.correct_answer() < OPTION_COUNT);
            assert!(!question.prompt().is_empty());
        }
        assert_eq!(default_questions().len(), 20);
        assert_eq!(backup_questions().len(), 5);
    }

    #[test]
    fn every_entry_passes_question_validation() {
        for entries in [&SEED_POOL[..], &BACKUP_SET[..]] {
            for ((prompt, options, correct, difficulty), built) in
                entries.iter().zip(build(entries))
            {
                let checked = Question::new(
                    built.id(),
                    *prompt,
                    options.map(str::to_owned).to_vec(),
                    *correct,
                    *difficulty,
                );
                assert_eq!(checked, Ok(built), "entry {prompt:?}");
            }
        }
    }

    #[test]
    fn ids_start_at_one() {
        let ids: Vec<_> = backup_questions().iter().map(Question::id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
