//! Interactive mode for the CLI.
//!
//! Prompts for a state, district, and case type from the loaded dataset
//! using `dialoguer`, prints the estimate, and offers to run another.

use std::collections::BTreeMap;
use std::sync::Arc;

use dialoguer::{Confirm, Select};
use justice_graph_backlog::{
    BacklogEstimator, BacklogQuery, DatasetIndex, Jurisdiction, match_key,
};

use crate::format_estimate;

/// Distinct values of `field` among `jurisdictions` that pass `keep`.
///
/// Values that differ only in case or surrounding whitespace collapse to
/// the first one seen. Sorted by match key.
fn choices<'a>(
    jurisdictions: &'a [Jurisdiction],
    keep: impl Fn(&Jurisdiction) -> bool,
    field: impl Fn(&'a Jurisdiction) -> &'a str,
) -> Vec<&'a str> {
    let mut seen = BTreeMap::new();
    for value in jurisdictions.iter().filter(|j| keep(j)).map(field) {
        seen.entry(match_key(value)).or_insert(value);
    }
    seen.into_values().collect()
}

fn pick<'a>(prompt: &str, items: &[&'a str]) -> Result<&'a str, Box<dyn std::error::Error>> {
    let idx = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;
    Ok(items[idx])
}

/// Runs the interactive estimate loop over `index`.
///
/// # Errors
///
/// Returns an error if a terminal prompt fails.
pub fn run(index: DatasetIndex) -> Result<(), Box<dyn std::error::Error>> {
    println!("JusticeGraph Backlog Estimator");
    println!();

    let jurisdictions = index.jurisdictions();
    if jurisdictions.is_empty() {
        println!("The dataset has no rows.");
        return Ok(());
    }

    let estimator = BacklogEstimator::new(Arc::new(index));

    loop {
        let states = choices(&jurisdictions, |_| true, |j| j.state.as_str());
        let state = pick("State", &states)?;

        let state_key = match_key(state);
        let districts = choices(
            &jurisdictions,
            |j| match_key(&j.state) == state_key,
            |j| j.district.as_str(),
        );
        let district = pick("District", &districts)?;

        let district_key = match_key(district);
        let case_types = choices(
            &jurisdictions,
            |j| match_key(&j.state) == state_key && match_key(&j.district) == district_key,
            |j| j.case_type.as_str(),
        );
        let case_type = pick("Case type", &case_types)?;

        let estimate = estimator.estimate(&BacklogQuery::new(state, district, case_type));
        println!();
        print!("{}", format_estimate(&estimate));
        println!();

        if !Confirm::new()
            .with_prompt("Estimate another?")
            .default(false)
            .interact()?
        {
            return Ok(());
        }
    }
}
