// Randomized keystroke streams against several reference texts, checking the
// strict-mode invariants after every single keystroke.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use typepace::{
    clock::ManualClock,
    scheduler::IntervalScheduler,
    typing_policy::{Key, Modifiers},
    Keystroke, Outcome, Status, TypingSession,
};

const TEXTS: &[&str] = &[
    "cat",
    "The quick brown fox jumps over the lazy dog.",
    "héllo wörld",
    "naïve café: 25% off!",
    "日本語 text",
    "a",
];

const STEPS_PER_RUN: usize = 400;

fn session() -> (TypingSession, IntervalScheduler) {
    let clock = ManualClock::new();
    let scheduler = IntervalScheduler::new(clock.clone());
    (TypingSession::new(clock, scheduler.clone()), scheduler)
}

/// Mostly the expected char, otherwise a random printable, a Backspace,
/// a navigation key or a Ctrl combination.
fn random_keystroke(rng: &mut StdRng, session: &TypingSession) -> Keystroke {
    let expected = session
        .reference()
        .get(session.input().len())
        .copied()
        .unwrap_or('a');
    match rng.gen_range(0..10) {
        0..=4 => Keystroke::char(expected),
        5 => Keystroke::char(rng.gen_range(' '..='~')),
        6 => {
            let reference = session.reference();
            Keystroke::char(reference[rng.gen_range(0..reference.len())])
        }
        7 => Keystroke::backspace(),
        8 => {
            let nav = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Home, Key::End, Key::Tab];
            Keystroke::new(nav[rng.gen_range(0..nav.len())], Modifiers::default())
        }
        _ => Keystroke::char(expected).with_ctrl(),
    }
}

#[test]
fn random_keystrokes_preserve_strict_invariants() {
    let mut rng = StdRng::seed_from_u64(0x7e9a);

    for text in TEXTS {
        for _run in 0..5 {
            let (mut session, scheduler) = session();
            session.start(text, None).unwrap();

            for _ in 0..STEPS_PER_RUN {
                if session.status() == Status::Finished {
                    break;
                }
                let before_len = session.input().len();
                let before_total = session.state().total_keystrokes;
                let before_errors = session.state().error_count;

                let keystroke = random_keystroke(&mut rng, &session);
                let report = session.submit_keystroke(keystroke);

                let input = session.input();
                let reference = session.reference();
                assert!(input.len() <= reference.len(), "{text:?}: input overran");
                assert_eq!(input, &reference[..input.len()], "{text:?}: not a prefix");
                assert!(report.metrics.accuracy <= 100);
                assert!(session.state().error_count <= session.state().total_keystrokes);

                match report.outcome {
                    Outcome::Erased => {
                        assert_eq!(input.len(), before_len.saturating_sub(1));
                        assert_eq!(session.state().total_keystrokes, before_total);
                        assert_eq!(session.state().error_count, before_errors);
                    }
                    Outcome::Correct => {
                        assert_eq!(input.len(), before_len + 1);
                        assert_eq!(session.state().total_keystrokes, before_total + 1);
                        assert_eq!(session.state().error_count, before_errors);
                    }
                    Outcome::Incorrect => {
                        assert_eq!(input.len(), before_len);
                        assert_eq!(session.state().total_keystrokes, before_total + 1);
                        assert_eq!(session.state().error_count, before_errors + 1);
                    }
                    Outcome::PassThrough | Outcome::Blocked => {
                        assert_eq!(input.len(), before_len);
                        assert_eq!(session.state().total_keystrokes, before_total);
                        assert_eq!(session.state().error_count, before_errors);
                    }
                    Outcome::Inactive => panic!("{text:?}: running session reported inactive"),
                }

                if session.status() == Status::Finished {
                    assert_eq!(session.input(), session.reference());
                    assert_eq!(scheduler.active_timers(), 0);
                }
            }
        }
    }
}

#[test]
fn exact_typing_of_any_text_is_perfect() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut texts: Vec<String> = TEXTS.iter().map(|t| t.to_string()).collect();
    for _ in 0..20 {
        let len = rng.gen_range(1..40);
        texts.push((0..len).map(|_| rng.gen_range(' '..='~')).collect());
    }

    for text in &texts {
        let (mut session, _scheduler) = session();
        session.start(text, None).unwrap();
        for c in text.chars() {
            assert_eq!(session.submit_keystroke(Keystroke::char(c)).outcome, Outcome::Correct);
        }

        assert_eq!(session.status(), Status::Finished, "{text:?}");
        assert_eq!(session.input_text(), *text);
        assert_eq!(session.state().error_count, 0);
        assert_eq!(session.metrics().accuracy, 100);
    }
}
