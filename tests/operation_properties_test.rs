use orthovar::spelling::levenshtein::{
    MAX_EDIT_DISTANCE, compute_edit_operations, damerau_levenshtein_distance,
};
use orthovar::spelling::template::{apply_operations, build_template};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_word(rng: &mut StdRng) -> String {
    let alphabet = ['a', 'b', 'c', 'é'];
    let len = rng.random_range(0..=6);
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

/// Derive a nearby word by a few random edits so most pairs fall under the cutoff.
fn mutate(rng: &mut StdRng, word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    for _ in 0..rng.random_range(1..=3) {
        match rng.random_range(0..4) {
            0 => {
                let at = rng.random_range(0..=chars.len());
                chars.insert(at, 'x');
            }
            1 if !chars.is_empty() => {
                let at = rng.random_range(0..chars.len());
                chars.remove(at);
            }
            2 if !chars.is_empty() => {
                let at = rng.random_range(0..chars.len());
                chars[at] = 'y';
            }
            3 if chars.len() >= 2 => {
                let at = rng.random_range(0..chars.len() - 1);
                chars.swap(at, at + 1);
            }
            _ => {}
        }
    }
    chars.into_iter().collect()
}

#[test]
fn test_operations_replay_to_target() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..2000 {
        let source = random_word(&mut rng);
        let target = if rng.random_bool(0.5) {
            mutate(&mut rng, &source)
        } else {
            random_word(&mut rng)
        };

        let distance = damerau_levenshtein_distance(&source, &target);
        let ops = compute_edit_operations(&source, &target);

        if distance == 0 || distance > MAX_EDIT_DISTANCE {
            assert!(ops.is_empty(), "{source} -> {target}: {ops:?}");
            continue;
        }

        assert_eq!(ops.len(), distance, "{source} -> {target}: {ops:?}");
        assert_eq!(
            apply_operations(&source, &target, &ops).unwrap(),
            target,
            "{source} -> {target}: {ops:?}"
        );
    }
}

#[test]
fn test_distance_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..1000 {
        let w1 = random_word(&mut rng);
        let w2 = mutate(&mut rng, &w1);

        let forward = compute_edit_operations(&w1, &w2);
        let backward = compute_edit_operations(&w2, &w1);
        assert_eq!(
            damerau_levenshtein_distance(&w1, &w2),
            damerau_levenshtein_distance(&w2, &w1)
        );
        assert_eq!(forward.len(), backward.len(), "{w1} <-> {w2}");
    }
}

#[test]
fn test_reverse_direction_uses_inverse_operations() {
    use orthovar::spelling::operation::OpCode;

    for (w1, w2) in [
        ("colour", "color"),
        ("night", "nite"),
        ("cat", "cot"),
        ("sing", "sign"),
        ("straße", "strasse"),
    ] {
        let mut forward: Vec<OpCode> = compute_edit_operations(w1, w2)
            .iter()
            .map(|op| op.inverse_kind())
            .collect();
        let mut backward: Vec<OpCode> = compute_edit_operations(w2, w1)
            .iter()
            .map(|op| op.code())
            .collect();
        forward.sort();
        backward.sort();
        assert_eq!(forward, backward, "{w1} <-> {w2}");
    }
}

#[test]
fn test_both_directions_classify_to_the_same_key() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut compared = 0;

    for _ in 0..3000 {
        let w1 = random_word(&mut rng);
        let w2 = mutate(&mut rng, &w1);

        let forward = build_template(&compute_edit_operations(&w1, &w2), &w1, &w2).unwrap();
        let backward = build_template(&compute_edit_operations(&w2, &w1), &w2, &w1).unwrap();
        if let (Some(forward), Some(backward)) = (forward, backward) {
            assert_eq!(forward.variant, backward.variant.inverse(), "{w1} <-> {w2}");
            assert_eq!(
                forward.variant.canonical_key(),
                backward.variant.canonical_key(),
                "{w1} <-> {w2}"
            );
            compared += 1;
        }
    }

    assert!(compared > 0);
}
