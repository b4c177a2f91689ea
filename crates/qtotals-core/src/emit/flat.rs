//! Flat CSV output.

use super::Result;
use crate::models::totals::QualifyingTotals;

/// One record per weight class, in insertion order.
pub fn to_csv(totals: &QualifyingTotals) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["event", "ageGroup", "gender", "weightClass", "qualifyingTotal"])?;

    for (key, entry) in totals.entries() {
        wtr.write_record([
            key.event.as_str(),
            key.age_group.as_str(),
            key.gender.as_str(),
            entry.weight_class.as_str(),
            entry.qualifying_total.as_str(),
        ])?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::test_support::sample_totals;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_csv() {
        assert_eq!(
            to_csv(&sample_totals()).unwrap(),
            "event,ageGroup,gender,weightClass,qualifyingTotal\n\
             Junior,U15,Male,53kg,120\n\
             Junior,U15,Male,59kg,135\n\
             Youth,U13,Female,40kg,60\n\
             Youth,U13,Female,+58kg,80\n"
        );
    }
}
