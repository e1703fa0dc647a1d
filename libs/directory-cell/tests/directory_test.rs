// libs/directory-cell/tests/directory_test.rs
use assert_matches::assert_matches;

use directory_cell::models::*;
use directory_cell::services::{
    Catalog, CatalogSource, InMemoryCatalog, ProviderDirectory, SeedCatalog,
};

fn seed_directory() -> ProviderDirectory {
    ProviderDirectory::from_source(&SeedCatalog).expect("seed catalog loads")
}

fn ids(providers: &[&Provider]) -> Vec<ProviderId> {
    providers.iter().map(|p| p.id).collect()
}

#[test]
fn search_with_default_query_returns_every_provider_once() {
    let directory = seed_directory();
    let results = directory.search(&ProviderQuery::default());

    assert_eq!(ids(&results), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn symptom_filter_keeps_only_providers_treating_it() {
    let directory = seed_directory();

    for symptom in Symptom::ALL {
        let results = directory.search(&ProviderQuery::new().with_symptom(symptom.as_str()));
        assert!(results.iter().all(|p| p.treats(symptom)));

        let expected = directory
            .catalog()
            .providers()
            .iter()
            .filter(|p| p.treats(symptom))
            .count();
        assert_eq!(results.len(), expected, "symptom {}", symptom);
    }
}

#[test]
fn chest_pain_search_finds_cardiologist_and_physician() {
    let directory = seed_directory();
    let results = directory.search(&ProviderQuery::new().with_symptom("chest-pain"));

    assert_eq!(ids(&results), vec![1, 6]);
}

#[test]
fn unknown_symptom_yields_empty_result() {
    let directory = seed_directory();
    let results = directory.search(&ProviderQuery::new().with_symptom("scurvy"));

    assert!(results.is_empty());
}

#[test]
fn unknown_locality_yields_empty_result() {
    let directory = seed_directory();

    assert!(directory.search(&ProviderQuery::new().with_locality("Gurgaon")).is_empty());
    assert_eq!(ids(&directory.search(&ProviderQuery::new().with_locality("Saket"))), vec![2]);
}

#[test]
fn fee_sort_is_ascending() {
    let directory = seed_directory();
    let results = directory.search(&ProviderQuery::new().sorted_by(SortBy::Fee));

    assert_eq!(results.len(), 6);
    assert!(results.windows(2).all(|w| w[0].consultation_fee <= w[1].consultation_fee));
    assert_eq!(results[0].name, "Dr. Amit Verma");
}

#[test]
fn rating_sort_is_descending_and_stable() {
    let directory = seed_directory();
    let results = directory.search(&ProviderQuery::new().sorted_by(SortBy::Rating));

    assert!(results.windows(2).all(|w| w[0].rating >= w[1].rating));
    // Priya Sharma and Kavita Singh share 4.8; catalog order breaks the tie.
    assert_eq!(ids(&results), vec![2, 1, 5, 3, 4, 6]);
}

#[test]
fn experience_sort_is_descending() {
    let directory = seed_directory();
    let results = directory.search(&ProviderQuery::new().sorted_by(SortBy::Experience));

    assert_eq!(ids(&results), vec![2, 5, 1, 4, 3, 6]);
}

#[test]
fn in_person_filter_excludes_remote_only_providers() {
    let mut records = SeedCatalog.load().unwrap();
    records.providers[1].in_person = false;
    let directory = ProviderDirectory::new(Catalog::ingest(records).unwrap());

    let query = ProviderQuery::new().with_consultation_type(ConsultationType::InPerson);
    let results = directory.search(&query);

    assert!(results.iter().all(|p| p.capabilities.in_person));
    assert!(!ids(&results).contains(&2));
}

#[test]
fn filters_combine_as_conjunction() {
    let directory = seed_directory();
    let query = ProviderQuery::new()
        .with_text("dr.")
        .with_symptom("headache")
        .with_locality("Lajpat Nagar")
        .with_consultation_type(ConsultationType::InPerson);

    assert_eq!(ids(&directory.search(&query)), vec![3]);

    let remote = query.with_consultation_type(ConsultationType::Teleconsultation);
    assert!(directory.search(&remote).is_empty());
}

#[test]
fn text_search_is_case_insensitive() {
    let directory = seed_directory();

    assert_eq!(ids(&directory.search(&ProviderQuery::new().with_text("NEURO"))), vec![2]);
    assert_eq!(ids(&directory.search(&ProviderQuery::new().with_text("ganga ram"))), vec![6]);
}

#[test]
fn identical_queries_give_identical_output() {
    let directory = seed_directory();
    let query = ProviderQuery::new().with_symptom("fever").sorted_by(SortBy::Fee);

    assert_eq!(ids(&directory.search(&query)), ids(&directory.search(&query)));
}

#[test]
fn get_facility_reports_missing_ids() {
    let directory = seed_directory();

    assert_eq!(directory.get_facility(1).unwrap().name, "All India Institute of Medical Sciences");
    assert_matches!(directory.get_facility(42), Err(DirectoryError::FacilityNotFound(42)));
    assert_matches!(directory.get_provider(42), Err(DirectoryError::ProviderNotFound(42)));
}

#[test]
fn facility_of_joins_provider_to_hospital() {
    let directory = seed_directory();
    let provider = directory.get_provider(5).unwrap();

    assert_eq!(directory.facility_of(provider).unwrap().name, "Safdarjung Hospital");
}

#[test]
fn listings_carry_facility_summary() {
    let directory = seed_directory();
    let listings = directory.listings(&ProviderQuery::new().with_symptom("eye-problems"));

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].facility_name, "Apollo Hospital");
    assert_eq!(listings[0].facility_review_count, 2156);
}

#[test]
fn unparseable_experience_sorts_last() {
    let mut records = SeedCatalog.load().unwrap();
    records.providers[0].experience = "fifteen".to_string();

    let directory = ProviderDirectory::from_source(&InMemoryCatalog::new(records)).unwrap();
    let results = directory.search(&ProviderQuery::new().sorted_by(SortBy::Experience));

    assert_eq!(results.last().unwrap().id, 1);
    assert_eq!(results.last().unwrap().experience_years, 0);
    assert_eq!(directory.catalog().warnings().len(), 1);
    assert_eq!(directory.catalog().warnings()[0].field, "experience");
}
