// entropy-analyzer-core/tests/strategy_properties.rs
//! Laws every strategy must obey, checked over hand-picked and seeded random inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use test_log::test;

use entropy_analyzer_core::{
    AnalyzerConfig, Datum, EntropyFactory, EntropyStrategy, JudgeClient, JudgeError, JudgeRequest, NumericalEntropy,
    SearchEngineEntropy, StrategyKind, TextEntropy, TimeEntropy,
};

/// A judge that always fails, so the contextual strategy stays offline.
struct OfflineJudge;

impl JudgeClient for OfflineJudge {
    fn complete(&self, _request: &JudgeRequest) -> Result<String, JudgeError> {
        Err(JudgeError::Transport("offline".to_string()))
    }
}

fn offline_factory() -> EntropyFactory {
    EntropyFactory::with_judge(&AnalyzerConfig::default(), Arc::new(OfflineJudge))
}

fn assert_unit(score: f64, context: &str) {
    assert!((0.0..=1.0).contains(&score), "{}: score {} outside [0, 1]", context, score);
}

fn random_text(rng: &mut StdRng) -> String {
    let len = rng.random_range(0..64);
    (0..len)
        .map(|_| match rng.random_range(0..4) {
            0 => char::from(rng.random_range(b'a'..=b'z')),
            1 => char::from(rng.random_range(b'0'..=b'9')),
            2 => ' ',
            _ => ['é', 'ß', '中', '🙂', '#'][rng.random_range(0..5)],
        })
        .collect()
}

fn random_timestamps(rng: &mut StdRng) -> Vec<String> {
    let mut t: i64 = 1_700_000_000;
    (0..rng.random_range(0..20))
        .map(|_| {
            t += rng.random_range(0..5_000);
            let dt = chrono::DateTime::from_timestamp(t, 0).unwrap_or_default();
            dt.format("%Y-%m-%dT%H:%M:%S").to_string()
        })
        .collect()
}

#[test]
fn absent_input_scores_zero_for_every_strategy() {
    let factory = offline_factory();
    for kind in StrategyKind::ALL {
        let strategy = factory.get_kind(kind);
        assert_eq!(strategy.compute_entropy(None).unwrap(), 0.0, "{}", kind);
        assert_eq!(strategy.compute_entropy(Some(&Datum::Null)).unwrap(), 0.0, "{}", kind);
    }
}

#[test]
fn fuzzed_valid_inputs_stay_in_unit_interval() {
    let factory = offline_factory();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..200 {
        let text = random_text(&mut rng);
        for kind in [StrategyKind::Text, StrategyKind::Contextual] {
            let score = factory.get_kind(kind).compute_entropy(Some(&Datum::from(text.as_str()))).unwrap();
            assert_unit(score, &format!("{} round {}", kind, round));
        }

        let numbers: Vec<Datum> = (0..rng.random_range(0..40))
            .map(|_| {
                if rng.random_bool(0.5) {
                    Datum::Int(rng.random_range(-1_000..1_000))
                } else {
                    Datum::Float(rng.random_range(-1e6..1e6))
                }
            })
            .collect();
        let score = factory.get_kind(StrategyKind::Numerical).compute_entropy(Some(&Datum::List(numbers))).unwrap();
        assert_unit(score, &format!("numerical round {}", round));

        let results: Vec<Datum> = (0..rng.random_range(0..8)).map(|_| Datum::from(random_text(&mut rng))).collect();
        let score = factory.get_kind(StrategyKind::Search).compute_entropy(Some(&Datum::List(results))).unwrap();
        assert_unit(score, &format!("search round {}", round));

        let timestamps = Datum::from(random_timestamps(&mut rng));
        let score = factory.get_kind(StrategyKind::Time).compute_entropy(Some(&timestamps)).unwrap();
        assert_unit(score, &format!("time round {}", round));
    }
}

#[test]
fn degenerate_inputs_score_zero() {
    let factory = offline_factory();
    let text = factory.get_kind(StrategyKind::Text);
    assert_eq!(text.compute_entropy(Some(&Datum::from(""))).unwrap(), 0.0);
    assert_eq!(text.compute_entropy(Some(&Datum::from("zzzzzz"))).unwrap(), 0.0);

    let numerical = factory.get_kind(StrategyKind::Numerical);
    assert_eq!(numerical.compute_entropy(Some(&Datum::from(vec![3.5]))).unwrap(), 0.0);
    assert_eq!(numerical.compute_entropy(Some(&Datum::from(vec![1, 1, 1, 1, 1]))).unwrap(), 0.0);

    let search = factory.get_kind(StrategyKind::Search);
    assert_eq!(search.compute_entropy(Some(&Datum::from(vec!["same", "same"]))).unwrap(), 0.0);

    let time = factory.get_kind(StrategyKind::Time);
    let one_day_apart = Datum::from(vec!["2024-03-01T12:00:00", "2024-03-02T12:00:00"]);
    assert_eq!(time.compute_entropy(Some(&one_day_apart)).unwrap(), 0.0);
}

#[test]
fn wrong_shapes_are_rejected() {
    let factory = offline_factory();
    let cases: Vec<(StrategyKind, Datum)> = vec![
        (StrategyKind::Text, Datum::Int(123)),
        (StrategyKind::Text, Datum::from(vec!["a"])),
        (StrategyKind::Contextual, Datum::Float(1.5)),
        (StrategyKind::Numerical, Datum::from("1,2,3")),
        (StrategyKind::Numerical, Datum::from(vec!["1", "2"])),
        (StrategyKind::Search, Datum::from("one result")),
        (StrategyKind::Search, Datum::from(vec![1, 2])),
        (StrategyKind::Time, Datum::Bool(true)),
        (StrategyKind::Time, Datum::from(vec!["2024-01-01", "not-a-time"])),
    ];
    for (kind, data) in cases {
        let err = factory.get_kind(kind).compute_entropy(Some(&data)).unwrap_err();
        assert!(err.is_invalid_input(), "{} accepted {}", kind, data);
    }
}

#[test]
fn more_diverse_inputs_score_higher() {
    let text = TextEntropy::new();
    assert!(text.score(Some("abcdefgh")) > text.score(Some("aaaabbbb")));
    assert!(text.score(Some("aaaabbbb")) > text.score(Some("aaaaaaaa")));

    let numerical = NumericalEntropy::new();
    let flat = numerical.score(Some(&[5.0, 5.0, 5.0, 5.0, 5.0][..])).unwrap();
    let spread = numerical.score(Some(&[1.0, 2.0, 3.0, 4.0, 5.0][..])).unwrap();
    assert!(spread > flat);

    let search = SearchEngineEntropy::new();
    let same = search.score(Some(&["rust", "rust", "rust"][..]));
    let varied = search.score(Some(&["rust", "gardening", "opera"][..]));
    assert!(varied > same);

    let time = TimeEntropy::new();
    let regular = time
        .score(Some(&["2024-01-01T00:00:00", "2024-01-01T00:01:00", "2024-01-01T00:02:00"][..]))
        .unwrap();
    let bursty = time
        .score(Some(&["2024-01-01T00:00:00", "2024-01-01T00:00:01", "2024-01-01T00:02:00", "2024-01-01T00:02:30"][..]))
        .unwrap();
    assert!(bursty > regular);
}

#[test]
fn concrete_scenarios() {
    let factory = offline_factory();
    let hello = factory.get(Some("text")).unwrap().compute_entropy(Some(&Datum::from("hello world"))).unwrap();
    assert!(hello > 0.0 && hello < 1.0);

    let spread = factory
        .get(Some("numerical"))
        .unwrap()
        .compute_entropy(Some(&Datum::from(vec![1, 2, 3, 4, 5])))
        .unwrap();
    assert!(spread > 0.0 && spread < 1.0);

    let contextual = factory.get(Some("contextual")).unwrap().compute_entropy(Some(&Datum::from("hello world"))).unwrap();
    assert_eq!(contextual, hello);
}

#[test]
fn factory_resolves_every_token() {
    let factory = EntropyFactory::global();
    for kind in EntropyFactory::kinds() {
        assert_eq!(factory.get(Some(kind.as_str())).unwrap().kind(), *kind);
    }
    let err = factory.get(Some("invalid")).unwrap_err();
    assert!(err.to_string().contains("Invalid Strategy Type: invalid"));
    assert!(factory.get_from_datum(Some(&Datum::Int(123))).is_err());
    assert!(factory.get(None).is_err());
}

#[test]
fn strategies_can_be_shared_across_threads() {
    let factory = Arc::new(offline_factory());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let factory = Arc::clone(&factory);
            std::thread::spawn(move || {
                let data = Datum::from(format!("thread {} says hello", i));
                factory.get(Some("text")).unwrap().compute_entropy(Some(&data)).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_unit(handle.join().unwrap(), "threaded text");
    }
}
