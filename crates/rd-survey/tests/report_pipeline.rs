//! End-to-end: raw export on disk → cache → filters → grouped averages.

use std::time::Duration;

use pretty_assertions::assert_eq;
use rd_survey::{
    ConditionGroup, Dimension, FilterSelection, SurveyCache, average_patient_loads,
    dependent_filters, mean_by,
};

const EXPORT: &str = "\
,facility_mfl,facility_name,county,level,ownership,nurses_employed,outpatient_jan,outpatient_feb,hiv_jan,hiv_htn_jan,hiv_htn_dm_jan
0,12001,Kitui County Referral,Kitui,Level 5,Ministry of Health,40.0,1200,1200,240,24,12
1,12002,Mwingi Health Centre,Kitui,Level 3,Ministry of Health,,600,9999,120,,
2,13001,Mbagathi Hospital,Nairobi,Level 4,Ministry of Health,25.5,2400,2400,480,48,24
3,13002,Westlands Medical,Nairobi,Level 3,Private Practice,6,360,360,not recorded,12,0
4,14001,Thika Level 5,Kiambu,Level 5,Ministry of Health,31,1800,1800,360,36,12
";

#[tokio::test]
async fn filtered_patient_loads_by_county() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baseline.csv");
    std::fs::write(&path, EXPORT).unwrap();

    let cache = SurveyCache::new(&path, Duration::from_secs(3600));
    let data = cache.get().await.unwrap();

    let staff = data.table.column("nurses_employed").unwrap();
    assert_eq!(staff.cells[1].as_number(), Some(0.0));
    assert_eq!(staff.cells[2].as_number(), Some(25.0));

    // 9999 in a numeric patient column is a placeholder, imputed with the median
    // of the remaining February values (360, 1200, 1800, 2400).
    assert_eq!(data.table.cell("outpatient_feb", 1).as_number(), Some(1500.0));

    let selection = FilterSelection::from_pairs([("county", "Kitui"), ("county", "Nairobi")]);
    let (options, rows) = dependent_filters(&data.table, &selection).unwrap();
    assert_eq!(options.distinct_owners, vec!["MOH".to_string(), "Private".to_string()]);
    assert_eq!(rows.len(), 4);

    let loads = average_patient_loads(&rows);
    let by_county = mean_by(&loads, Dimension::County);
    let names: Vec<&str> = by_county.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(names, vec!["Kitui", "Nairobi"]);

    let kitui_outpatient = by_county[0]
        .loads
        .iter()
        .find(|l| l.condition == ConditionGroup::Outpatient)
        .unwrap()
        .average_monthly;
    // (2400 / 12 + 2100 / 12) / 2
    assert_eq!(kitui_outpatient, 187.5);
}
