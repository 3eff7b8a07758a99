use std::collections::HashMap;

use crate::config::{COMPANY_IMAGE_DIR, SPECIALITY_IMAGE_DIR};
use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::company::CompanyChanges;
use crate::models::speciality::NewSpeciality;
use crate::models::vacancy::VacancyChanges;

const SPECIALITIES: &[(&str, &str)] = &[
    ("frontend", "Frontend"),
    ("backend", "Backend"),
    ("gamedev", "Gamedev"),
    ("devops", "DevOps"),
    ("design", "Design"),
    ("products", "Products"),
    ("management", "Management"),
    ("testing", "Testing"),
];

// name, location, logo, description, employee count
const COMPANIES: &[(&str, &str, &str, &str, i32)] = &[
    ("workiro", "london", "logo1.png", "the best company in the world", 10_000),
    ("rebelrage", "sealand", "logo2.png", "the worst company in the world", 1),
    ("staffingsmarter", "tagil", "logo3.png", "the mediocrest company in the world", 5),
    ("evilthreat", "usa", "logo4.png", "be evil is our motto", 1_000_000),
    ("hirey", "moscow", "logo5.png", "we hire people wooo", 54),
    ("swiftattack", "holy terra", "logo6.png", "for emperor!!!1111", 1_000_000_000),
    ("troller", "internet", "logo7.png", "we troll people. that's it", 1000),
    ("primalassault", "location", "logo8.png", "description", 0),
];

// title, speciality, company, skills, salary range
const VACANCIES: &[(&str, &str, &str, &str, i32, i32)] = &[
    ("Python developer", "backend", "staffingsmarter", "tolerance, humility", 100_000, 150_000),
    (
        "Django project developer",
        "backend",
        "swiftattack",
        "sleeping at work unnoticed",
        80_000,
        90_000,
    ),
    (
        "Swift developer for an outsourcing company",
        "backend",
        "swiftattack",
        "communication, stress resistance",
        120_000,
        150_000,
    ),
    (
        "Middle Python programmer",
        "backend",
        "workiro",
        "working for food, communication",
        80_000,
        90_000,
    ),
    (
        "Pythonista for a startup",
        "backend",
        "primalassault",
        "working for food, sleeping at work unnoticed",
        120_000,
        150_000,
    ),
];

/// Fills an empty store with the demo catalogue. A store that already has
/// specialities is left untouched.
pub async fn seed_demo_data(store: &dyn Store) -> Result<()> {
    if !store.list_specialities().await?.is_empty() {
        tracing::info!("store already has data, skipping demo seed");
        return Ok(());
    }

    let mut speciality_ids = HashMap::new();
    for (code, title) in SPECIALITIES {
        let speciality = store
            .insert_speciality(NewSpeciality {
                code: code.to_string(),
                title: title.to_string(),
                picture: format!("{}/specty_{}.png", SPECIALITY_IMAGE_DIR, code),
            })
            .await?;
        speciality_ids.insert(*code, speciality.id);
    }

    let mut company_ids = HashMap::new();
    for (name, location, logo, description, employee_count) in COMPANIES {
        let company = store
            .insert_company(CompanyChanges {
                name: name.to_string(),
                location: location.to_string(),
                description: description.to_string(),
                logo: format!("{}/{}", COMPANY_IMAGE_DIR, logo),
                employee_count: *employee_count,
                owner_id: None,
            })
            .await?;
        company_ids.insert(*name, company.id);
    }

    for (title, speciality, company, skills, salary_min, salary_max) in VACANCIES {
        let speciality_id = *speciality_ids
            .get(speciality)
            .ok_or_else(|| Error::Internal(format!("unknown demo speciality {}", speciality)))?;
        let company_id = *company_ids
            .get(company)
            .ok_or_else(|| Error::Internal(format!("unknown demo company {}", company)))?;
        store
            .insert_vacancy(VacancyChanges {
                title: title.to_string(),
                skills: skills.to_string(),
                text: "Details to follow".to_string(),
                salary_min: Some(*salary_min),
                salary_max: Some(*salary_max),
                speciality_id,
                company_id,
            })
            .await?;
    }

    tracing::info!(
        specialities = SPECIALITIES.len(),
        companies = COMPANIES.len(),
        vacancies = VACANCIES.len(),
        "demo data seeded"
    );
    Ok(())
}
