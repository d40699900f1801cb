use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;

use passgen::{
    generate, generate_default, generate_with, CharacterSet, GenerationError, GenerationRequest,
    Strategy,
};

fn selections() -> Vec<Vec<CharacterSet>> {
    let mut all = CharacterSet::ALL
        .iter()
        .map(|&set| vec![set])
        .collect::<Vec<_>>();
    all.push(vec![CharacterSet::UpperCaseLetters, CharacterSet::Digits]);
    all.push(vec![CharacterSet::LowerCaseLetters, CharacterSet::Symbols]);
    all.push(CharacterSet::ALL.to_vec());
    all
}

fn in_union(sets: &[CharacterSet], ch: char) -> bool {
    sets.iter().any(|set| set.contains(ch))
}

#[test]
fn length_is_exact() {
    let mut rng = StdRng::seed_from_u64(0);
    for sets in selections() {
        for length in 4..=64 {
            for allow_ambiguous in [false, true] {
                let password = generate(&mut rng, &sets, length, allow_ambiguous).unwrap();
                assert_eq!(password.as_str().chars().count(), length);
            }
        }
    }
}

#[test]
fn every_selected_set_is_covered() {
    let mut rng = StdRng::seed_from_u64(1);
    for sets in selections() {
        for _ in 0..200 {
            let password = generate(&mut rng, &sets, 4, false).unwrap();
            for set in &sets {
                assert!(
                    set.contains_any(password.as_str()),
                    "{set} missing from a {}-set password",
                    sets.len()
                );
            }
        }
    }
}

#[test]
fn characters_come_from_selected_sets_only() {
    let mut rng = StdRng::seed_from_u64(2);
    for sets in selections() {
        let password = generate(&mut rng, &sets, 48, true).unwrap();
        assert!(password.as_str().chars().all(|ch| in_union(&sets, ch)));
    }
}

#[test]
fn ambiguous_characters_are_excluded_by_default() {
    let mut rng = StdRng::seed_from_u64(3);
    let all = CharacterSet::ALL;
    for strategy in [Strategy::Rejection, Strategy::Placement] {
        let request = GenerationRequest::new(&all, 64, false).unwrap();
        for _ in 0..200 {
            let password = generate_with(&mut rng, &request, strategy);
            assert!(!password.as_str().contains(['I', 'O', 'l']), "{strategy}");
        }
    }
    for _ in 0..200 {
        let password = generate_default(&mut rng, &all, 64).unwrap();
        assert!(!password.as_str().contains(['I', 'O', 'l']));
    }
}

#[test]
fn ambiguous_characters_can_appear_when_allowed() {
    let mut rng = StdRng::seed_from_u64(4);
    let seen = (0..500).any(|_| {
        generate(&mut rng, &[CharacterSet::LowerCaseLetters], 16, true)
            .unwrap()
            .as_str()
            .contains('l')
    });
    assert!(seen);
}

#[test]
fn validation_failures() {
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(
        generate(&mut rng, &[], 8, false),
        Err(GenerationError::EmptySelection)
    );
    for sets in selections() {
        for length in 0..=3 {
            assert_eq!(
                generate(&mut rng, &sets, length, false),
                Err(GenerationError::LengthTooShort { length, minimum: 4 })
            );
        }
    }
}

#[test]
fn digits_only() {
    let mut rng = StdRng::seed_from_u64(6);
    let password = generate(&mut rng, &[CharacterSet::Digits], 6, false).unwrap();
    assert_eq!(password.len(), 6);
    assert!(password.as_str().chars().all(|ch| ch.is_ascii_digit()));
}

#[test]
fn upper_case_and_digits() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let password = generate(
            &mut rng,
            &[CharacterSet::UpperCaseLetters, CharacterSet::Digits],
            8,
            false,
        )
        .unwrap();
        let s = password.as_str();
        assert!(s.chars().any(|ch| ch.is_ascii_uppercase()));
        assert!(s.chars().any(|ch| ch.is_ascii_digit()));
        assert!(!s.contains(['I', 'O']));
    }
}

#[test]
fn short_lower_case_never_has_l() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..500 {
        let password = generate(&mut rng, &[CharacterSet::LowerCaseLetters], 4, false).unwrap();
        assert!(!password.as_str().contains('l'));
    }
}

#[test]
fn seeded_generation_is_repeatable() {
    let all = CharacterSet::ALL;
    let first = generate(&mut StdRng::seed_from_u64(99), &all, 24, false).unwrap();
    let second = generate(&mut StdRng::seed_from_u64(99), &all, 24, false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn passwords_are_not_degenerate() {
    let mut rng = rand::thread_rng();
    let unique = (0..100)
        .map(|_| {
            generate(&mut rng, &CharacterSet::ALL, 16, false)
                .unwrap()
                .into_string()
        })
        .collect::<HashSet<_>>();
    assert_eq!(unique.len(), 100);
}

#[test]
fn usable_from_many_threads() {
    let request = Arc::new(GenerationRequest::new(&CharacterSet::ALL, 12, false).unwrap());
    let handles = (0..8)
        .map(|i| {
            let request = Arc::clone(&request);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(i);
                (0..50)
                    .map(|_| generate_with(&mut rng, &request, Strategy::Rejection))
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        for password in handle.join().unwrap() {
            assert_eq!(password.len(), 12);
            assert!(request.is_covered_by(password.as_str()));
        }
    }
}
