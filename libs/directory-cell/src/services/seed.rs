// libs/directory-cell/src/services/seed.rs
use chrono::NaiveDate;

use crate::models::{CatalogRecords, FacilityRecord, ProviderRecord};

/// Localities offered by the kiosk's location picker, in display order.
/// Gurgaon has no seeded providers yet.
pub const KIOSK_LOCALITIES: [&str; 7] = [
    "Connaught Place",
    "Karol Bagh",
    "Lajpat Nagar",
    "Saket",
    "Rohini",
    "Dwarka",
    "Gurgaon",
];

const FEMALE_AVATAR: &str = "👩‍⚕️";
const MALE_AVATAR: &str = "👨‍⚕️";

pub fn seed_records() -> CatalogRecords {
    CatalogRecords {
        providers: seed_providers(),
        facilities: seed_facilities(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn provider(
    id: u32,
    name: &str,
    avatar: &str,
    specialization: &str,
    (rating, reviews): (f32, u32),
    experience: &str,
    hospital_id: u32,
    location: &str,
    consultation_fee: f64,
    (teleconsultation, in_person): (bool, bool),
    next_available: NaiveDate,
    languages: &[&str],
    education: &str,
    symptoms: &[&str],
    time_slots: &[&str],
) -> ProviderRecord {
    ProviderRecord {
        id,
        name: name.to_string(),
        specialization: specialization.to_string(),
        rating,
        reviews,
        experience: experience.to_string(),
        hospital_id,
        location: location.to_string(),
        avatar: avatar.to_string(),
        consultation_fee,
        teleconsultation,
        in_person,
        next_available,
        languages: strings(languages),
        education: education.to_string(),
        symptoms: strings(symptoms),
        time_slots: strings(time_slots),
    }
}

fn seed_providers() -> Vec<ProviderRecord> {
    vec![
        provider(
            1,
            "Dr. Priya Sharma",
            FEMALE_AVATAR,
            "Cardiologist",
            (4.8, 156),
            "15 years",
            1,
            "Connaught Place",
            800.0,
            (true, true),
            date(2024, 1, 15),
            &["Hindi", "English"],
            "MBBS, MD from AIIMS Delhi",
            &["chest-pain", "headache", "fever"],
            &["09:00 AM", "11:00 AM", "02:00 PM", "04:00 PM"],
        ),
        provider(
            2,
            "Dr. Rajesh Kumar",
            MALE_AVATAR,
            "Neurologist",
            (4.9, 203),
            "18 years",
            2,
            "Saket",
            1200.0,
            (true, true),
            date(2024, 1, 14),
            &["Hindi", "English", "Punjabi"],
            "MBBS, DM Neurology from PGI Chandigarh",
            &["headache", "back-pain", "fever"],
            &["10:00 AM", "01:00 PM", "03:00 PM", "05:00 PM"],
        ),
        provider(
            3,
            "Dr. Anjali Gupta",
            FEMALE_AVATAR,
            "Orthopedist",
            (4.7, 128),
            "12 years",
            3,
            "Lajpat Nagar",
            1000.0,
            (false, true),
            date(2024, 1, 16),
            &["Hindi", "English"],
            "MBBS, MS Orthopedics from Maulana Azad Medical College",
            &["back-pain", "headache", "fever"],
            &["08:00 AM", "10:00 AM", "02:00 PM"],
        ),
        provider(
            4,
            "Dr. Suresh Patel",
            MALE_AVATAR,
            "Ophthalmologist",
            (4.6, 89),
            "14 years",
            4,
            "Dwarka",
            900.0,
            (true, true),
            date(2024, 1, 15),
            &["Hindi", "English", "Gujarati"],
            "MBBS, MS Ophthalmology from King George Medical University",
            &["eye-problems", "headache", "fever"],
            &["09:00 AM", "11:00 AM", "03:00 PM", "05:00 PM"],
        ),
        provider(
            5,
            "Dr. Kavita Singh",
            FEMALE_AVATAR,
            "ENT Specialist",
            (4.8, 145),
            "16 years",
            5,
            "Karol Bagh",
            700.0,
            (true, true),
            date(2024, 1, 17),
            &["Hindi", "English"],
            "MBBS, MS ENT from Lady Hardinge Medical College",
            &["ear-problems", "headache", "fever"],
            &["09:30 AM", "12:00 PM", "03:30 PM", "05:30 PM"],
        ),
        provider(
            6,
            "Dr. Amit Verma",
            MALE_AVATAR,
            "General Physician",
            (4.5, 187),
            "10 years",
            6,
            "Rohini",
            600.0,
            (true, true),
            date(2024, 1, 13),
            &["Hindi", "English"],
            "MBBS, MD General Medicine from Maulana Azad Medical College",
            &["fever", "headache", "chest-pain", "back-pain", "eye-problems", "ear-problems"],
            &["08:30 AM", "11:30 AM", "02:30 PM", "04:30 PM"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn facility(
    id: u32,
    name: &str,
    (rating, reviews): (f32, u32),
    location: &str,
    address: &str,
    phone: &str,
    specialties: &[&str],
    image: &str,
    established: &str,
    (beds, doctors): (u32, u32),
) -> FacilityRecord {
    FacilityRecord {
        id,
        name: name.to_string(),
        rating,
        reviews,
        location: location.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        emergency: true,
        specialties: strings(specialties),
        image: image.to_string(),
        established: established.to_string(),
        beds,
        doctors,
    }
}

fn seed_facilities() -> Vec<FacilityRecord> {
    vec![
        facility(
            1,
            "All India Institute of Medical Sciences",
            (4.9, 2850),
            "Connaught Place",
            "Ansari Nagar, New Delhi - 110029",
            "+91-11-26588500",
            &["Cardiology", "Emergency Medicine", "Surgery", "Neurology"],
            "🏥",
            "1956",
            (2478, 12),
        ),
        facility(
            2,
            "Fortis Healthcare",
            (4.7, 1856),
            "Saket",
            "B-22, Sector 62, Noida - 201301",
            "+91-120-6644000",
            &["Neurology", "Cardiology", "Oncology"],
            "🧠",
            "2001",
            (736, 15),
        ),
        facility(
            3,
            "Max Super Speciality Hospital",
            (4.6, 1287),
            "Lajpat Nagar",
            "1-2, Press Enclave Road, Saket, New Delhi - 110017",
            "+91-11-26515050",
            &["Orthopedics", "Sports Medicine", "Rehabilitation"],
            "🦴",
            "2006",
            (350, 18),
        ),
        facility(
            4,
            "Apollo Hospital",
            (4.8, 2156),
            "Dwarka",
            "Sarita Vihar, Mathura Road, New Delhi - 110076",
            "+91-11-26925858",
            &["Ophthalmology", "Cardiology", "Neurosurgery"],
            "👁️",
            "1996",
            (695, 20),
        ),
        facility(
            5,
            "Safdarjung Hospital",
            (4.4, 1456),
            "Karol Bagh",
            "Ansari Nagar West, New Delhi - 110029",
            "+91-11-26165060",
            &["ENT", "General Medicine", "Surgery"],
            "🏥",
            "1942",
            (1500, 10),
        ),
        facility(
            6,
            "Sir Ganga Ram Hospital",
            (4.6, 1687),
            "Rohini",
            "Rajinder Nagar, New Delhi - 110060",
            "+91-11-42251000",
            &["General Medicine", "Surgery", "Pediatrics"],
            "🏥",
            "1951",
            (675, 16),
        ),
    ]
}
