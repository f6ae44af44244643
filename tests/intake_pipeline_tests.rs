use anyhow::Result;
use calorie_tracker::error::TrackerError;
use calorie_tracker::food_matcher::{FoodIndex, ItemOutcome, ResolverConfig};
use calorie_tracker::food_types::FoodRecord;
use calorie_tracker::intake::log_phrase;
use calorie_tracker::intake_aggregator::{aggregate, progress, summarize, FoodLog};
use calorie_tracker::phrase_segmenter::{segment, ParsedItem};
use calorie_tracker::profile::Profile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_reference_table() -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, " Name ,Calories,Protein_g,Fat_g,Carbs_g")?;
    writeln!(file, "Chapati,104,3,2,19")?;
    writeln!(file, "Dal,120,6,4,15")?;
    file.flush()?;
    Ok(file)
}

fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

#[test]
fn test_end_to_end_chapati_and_dal() -> Result<()> {
    let file = write_reference_table()?;
    let index = FoodIndex::from_csv(file.path(), ResolverConfig::default())?;

    assert_eq!(
        segment("2 Chapati and 1 Dal"),
        vec![ParsedItem::new(2, "Chapati"), ParsedItem::new(1, "Dal")]
    );

    let mut log = FoodLog::new();
    let outcomes = log_phrase(&index, "2 Chapati and 1 Dal", &mut log);
    assert!(outcomes.iter().all(|o| matches!(o, ItemOutcome::Accepted(_))));

    let totals = aggregate(log.entries());
    assert_eq!(totals.calories, 328.0);
    assert_eq!(totals.protein_g, 12.0);
    assert_eq!(totals.fat_g, 8.0);
    assert_eq!(totals.carbs_g, 53.0);
    assert_eq!(progress(&totals, 2000.0), Ok(0.164));
    Ok(())
}

#[test]
fn test_sibling_failures_do_not_abort_the_phrase() -> Result<()> {
    let file = write_reference_table()?;
    let index = FoodIndex::from_csv(file.path(), ResolverConfig::default())?;

    let mut log = FoodLog::new();
    let outcomes = log_phrase(&index, "3 and zzzz and 0 Chapati and Dal", &mut log);
    assert_eq!(outcomes.len(), 3);
    assert!(matches!(&outcomes[0], ItemOutcome::NoMatch { quantity: 3, score, .. } if *score == 0.0));
    assert!(matches!(&outcomes[1], ItemOutcome::NoMatch { .. }));
    assert!(matches!(&outcomes[2], ItemOutcome::Accepted(r) if r.food == "Dal"));

    // A hand-built zero quantity is still rejected item by item.
    let outcomes = index.resolve_items(&[ParsedItem::new(0, "Chapati"), ParsedItem::new(1, "Dal")]);
    assert!(matches!(
        &outcomes[0],
        ItemOutcome::Rejected { error: TrackerError::InvalidQuantity(0), .. }
    ));
    assert!(matches!(&outcomes[1], ItemOutcome::Accepted(r) if r.food == "Dal"));
    assert_eq!(aggregate(log.entries()).calories, 120.0);
    Ok(())
}

#[test]
fn test_single_row_table_accepts_close_spelling() {
    let index = FoodIndex::new(vec![FoodRecord::new("Chapati", 104.0, 0.0, 0.0, 0.0)], ResolverConfig::default());
    for quantity in 1..=4 {
        let resolution = index.resolve("Chapathi", quantity).unwrap();
        assert!(resolution.score > 60.0);
        assert_eq!(resolution.result.unwrap().nutrition.calories, 104.0 * quantity as f64);
    }
}

#[test]
fn test_quantity_splits_are_additive() {
    let index = FoodIndex::new(
        vec![
            FoodRecord::new("Rice", 130.0, 2.5, 0.3, 28.0),
            FoodRecord::new("Rajma", 140.0, 8.7, 0.5, 22.8),
        ],
        ResolverConfig::default(),
    );
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let q1: i64 = rng.gen_range(1..=20);
        let q2: i64 = rng.gen_range(1..=20);
        let food = if rng.gen_bool(0.5) { "rice" } else { "rajma" };

        let whole = index.resolve(food, q1 + q2).unwrap().result.unwrap();
        let first = index.resolve(food, q1).unwrap().result.unwrap();
        let second = index.resolve(food, q2).unwrap().result.unwrap();
        let split = aggregate(&[first, second]);

        assert!(approx_eq(whole.nutrition.calories, split.calories));
        assert!(approx_eq(whole.nutrition.protein_g, split.protein_g));
        assert!(approx_eq(whole.nutrition.fat_g, split.fat_g));
        assert!(approx_eq(whole.nutrition.carbs_g, split.carbs_g));
    }
}

#[test]
fn test_resolution_is_idempotent() -> Result<()> {
    let file = write_reference_table()?;
    let index = FoodIndex::from_csv(file.path(), ResolverConfig::default())?;
    let first = index.resolve("chapatti", 2)?;
    let second = index.resolve("chapatti", 2)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_empty_table_makes_everything_a_no_match() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "food,calories,protein_g,fat_g,carbs_g")?;
    file.flush()?;
    let index = FoodIndex::from_csv(file.path(), ResolverConfig::default())?;

    let mut log = FoodLog::new();
    let outcomes = log_phrase(&index, "2 Chapati and Dal", &mut log);
    assert!(outcomes.iter().all(|o| matches!(o, ItemOutcome::NoMatch { .. })));
    assert!(log.is_empty());
    assert_eq!(progress(&aggregate(log.entries()), 2000.0), Ok(0.0));
    Ok(())
}

#[test]
fn test_summary_against_profile_target() -> Result<()> {
    let file = write_reference_table()?;
    let index = FoodIndex::from_csv(file.path(), ResolverConfig::default())?;
    let mut log = FoodLog::new();
    log_phrase(&index, "2 Chapati and 1 Dal", &mut log);

    let profile = Profile::default();
    let summary = summarize(&log, profile.daily_target());
    assert_eq!(summary.items_logged, 2);
    assert!(approx_eq(summary.progress.unwrap(), 328.0 / profile.daily_target()));

    let degenerate = summarize(&log, 0.0);
    assert_eq!(degenerate.totals.calories, 328.0);
    assert_eq!(degenerate.progress, None);
    Ok(())
}
