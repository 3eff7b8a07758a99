use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::Store;
use crate::error::{Error, Result};
use crate::models::{
    application::{Application, NewApplication},
    company::{Company, CompanyChanges, CompanySummary},
    resume::{Resume, ResumeChanges},
    speciality::{NewSpeciality, Speciality, SpecialitySummary},
    user::{NewUser, User},
    vacancy::{Vacancy, VacancyChanges, VacancyFilter, VacancyListing},
};

const VACANCY_COLUMNS: &str =
    "id, title, skills, text, salary_min, salary_max, published_at, speciality_id, company_id";

const COMPANY_COLUMNS: &str = "id, name, location, description, logo, employee_count, owner_id";

const RESUME_COLUMNS: &str = "id, name, surname, status, salary, grade, education, experience, \
     portfolio, speciality_id, user_id";

const USER_COLUMNS: &str = "id, username, first_name, last_name, email, password_hash, date_joined";

const VACANCY_LISTING_SELECT: &str = r#"
    SELECT
        v.id, v.title, v.skills, v.text, v.salary_min, v.salary_max, v.published_at,
        v.speciality_id, s.code AS speciality_code, s.title AS speciality_title,
        v.company_id, c.name AS company_name, c.logo AS company_logo,
        (SELECT COUNT(*) FROM applications a WHERE a.vacancy_id = v.id) AS applications_count
    FROM vacancies v
    JOIN specialities s ON s.id = v.speciality_id
    JOIN companies c ON c.id = v.company_id
"#;

/// Status and grade are stored as their text codes.
#[derive(FromRow)]
struct ResumeRecord {
    id: i64,
    name: String,
    surname: String,
    status: String,
    salary: Option<i32>,
    grade: String,
    education: String,
    experience: String,
    portfolio: String,
    speciality_id: i64,
    user_id: Option<i64>,
}

impl TryFrom<ResumeRecord> for Resume {
    type Error = Error;

    fn try_from(row: ResumeRecord) -> Result<Self> {
        Ok(Resume {
            id: row.id,
            name: row.name,
            surname: row.surname,
            status: row.status.parse().map_err(Error::Internal)?,
            salary: row.salary,
            grade: row.grade.parse().map_err(Error::Internal)?,
            education: row.education,
            experience: row.experience,
            portfolio: row.portfolio,
            speciality_id: row.speciality_id,
            user_id: row.user_id,
        })
    }
}

/// Escapes LIKE metacharacters so user input is matched literally.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_specialities(&self) -> Result<Vec<SpecialitySummary>> {
        let rows = sqlx::query_as::<_, SpecialitySummary>(
            r#"
            SELECT s.id, s.code, s.title, s.picture, COUNT(v.id) AS vacancies_count
            FROM specialities s
            LEFT JOIN vacancies v ON v.speciality_id = s.id
            GROUP BY s.id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn speciality_by_id(&self, id: i64) -> Result<Option<Speciality>> {
        let row = sqlx::query_as::<_, Speciality>(
            "SELECT id, code, title, picture FROM specialities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn speciality_by_code(&self, code: &str) -> Result<Option<Speciality>> {
        let row = sqlx::query_as::<_, Speciality>(
            "SELECT id, code, title, picture FROM specialities WHERE code = $1 ORDER BY id LIMIT 1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_speciality(&self, new: NewSpeciality) -> Result<Speciality> {
        let row = sqlx::query_as::<_, Speciality>(
            r#"
            INSERT INTO specialities (code, title, picture)
            VALUES ($1, $2, $3)
            RETURNING id, code, title, picture
            "#,
        )
        .bind(new.code)
        .bind(new.title)
        .bind(new.picture)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_companies(&self) -> Result<Vec<CompanySummary>> {
        let rows = sqlx::query_as::<_, CompanySummary>(
            r#"
            SELECT c.id, c.name, c.location, c.logo, c.employee_count, COUNT(v.id) AS vacancies_count
            FROM companies c
            LEFT JOIN vacancies v ON v.company_id = c.id
            GROUP BY c.id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn company_by_id(&self, id: i64) -> Result<Option<Company>> {
        let query = format!("SELECT {} FROM companies WHERE id = $1", COMPANY_COLUMNS);
        let row = sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn company_by_owner(&self, owner_id: i64) -> Result<Option<Company>> {
        let query = format!("SELECT {} FROM companies WHERE owner_id = $1", COMPANY_COLUMNS);
        let row = sqlx::query_as::<_, Company>(&query)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn company_by_name(&self, name: &str) -> Result<Option<Company>> {
        let query = format!("SELECT {} FROM companies WHERE name = $1", COMPANY_COLUMNS);
        let row = sqlx::query_as::<_, Company>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_company(&self, changes: CompanyChanges) -> Result<Company> {
        let query = format!(
            r#"
            INSERT INTO companies (name, location, description, logo, employee_count, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        );
        let row = sqlx::query_as::<_, Company>(&query)
            .bind(changes.name)
            .bind(changes.location)
            .bind(changes.description)
            .bind(changes.logo)
            .bind(changes.employee_count)
            .bind(changes.owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_company(&self, id: i64, changes: CompanyChanges) -> Result<Company> {
        let query = format!(
            r#"
            UPDATE companies
            SET name = $2, location = $3, description = $4, logo = $5,
                employee_count = $6, owner_id = $7
            WHERE id = $1
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        );
        let row = sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(changes.name)
            .bind(changes.location)
            .bind(changes.description)
            .bind(changes.logo)
            .bind(changes.employee_count)
            .bind(changes.owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_vacancies(&self, filter: VacancyFilter) -> Result<Vec<VacancyListing>> {
        let rows = match filter {
            VacancyFilter::All => {
                let query = format!("{} ORDER BY v.id", VACANCY_LISTING_SELECT);
                sqlx::query_as::<_, VacancyListing>(&query)
                    .fetch_all(&self.pool)
                    .await?
            }
            VacancyFilter::SpecialityCode(code) => {
                let query = format!("{} WHERE s.code = $1 ORDER BY v.id", VACANCY_LISTING_SELECT);
                sqlx::query_as::<_, VacancyListing>(&query)
                    .bind(code)
                    .fetch_all(&self.pool)
                    .await?
            }
            VacancyFilter::Company(company_id) => {
                let query = format!(
                    "{} WHERE v.company_id = $1 ORDER BY v.id",
                    VACANCY_LISTING_SELECT
                );
                sqlx::query_as::<_, VacancyListing>(&query)
                    .bind(company_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            VacancyFilter::Search(text) => {
                let query = format!(
                    r#"{}
                    WHERE v.title ILIKE $1 ESCAPE '\'
                       OR v.skills ILIKE $1 ESCAPE '\'
                       OR v.text ILIKE $1 ESCAPE '\'
                    ORDER BY v.id"#,
                    VACANCY_LISTING_SELECT
                );
                sqlx::query_as::<_, VacancyListing>(&query)
                    .bind(like_pattern(&text))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn vacancy_by_id(&self, id: i64) -> Result<Option<VacancyListing>> {
        let query = format!("{} WHERE v.id = $1", VACANCY_LISTING_SELECT);
        let row = sqlx::query_as::<_, VacancyListing>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_vacancy(&self, changes: VacancyChanges) -> Result<Vacancy> {
        let query = format!(
            r#"
            INSERT INTO vacancies (title, skills, text, salary_min, salary_max, published_at, speciality_id, company_id)
            VALUES ($1, $2, $3, $4, $5, CURRENT_DATE, $6, $7)
            RETURNING {}
            "#,
            VACANCY_COLUMNS
        );
        let row = sqlx::query_as::<_, Vacancy>(&query)
            .bind(changes.title)
            .bind(changes.skills)
            .bind(changes.text)
            .bind(changes.salary_min)
            .bind(changes.salary_max)
            .bind(changes.speciality_id)
            .bind(changes.company_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_vacancy(&self, id: i64, changes: VacancyChanges) -> Result<Vacancy> {
        let query = format!(
            r#"
            UPDATE vacancies
            SET title = $2, skills = $3, text = $4, salary_min = $5, salary_max = $6,
                speciality_id = $7, company_id = $8
            WHERE id = $1
            RETURNING {}
            "#,
            VACANCY_COLUMNS
        );
        let row = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .bind(changes.title)
            .bind(changes.skills)
            .bind(changes.text)
            .bind(changes.salary_min)
            .bind(changes.salary_max)
            .bind(changes.speciality_id)
            .bind(changes.company_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_application(&self, new: NewApplication) -> Result<Application> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (written_username, written_phone, written_cover_letter, vacancy_id, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, written_username, written_phone, written_cover_letter, vacancy_id, user_id, created_at
            "#,
        )
        .bind(new.written_username)
        .bind(new.written_phone)
        .bind(new.written_cover_letter)
        .bind(new.vacancy_id)
        .bind(new.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn applications_for_vacancy(&self, vacancy_id: i64) -> Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, written_username, written_phone, written_cover_letter, vacancy_id, user_id, created_at
            FROM applications
            WHERE vacancy_id = $1
            ORDER BY id
            "#,
        )
        .bind(vacancy_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn resume_by_user(&self, user_id: i64) -> Result<Option<Resume>> {
        let query = format!("SELECT {} FROM resumes WHERE user_id = $1", RESUME_COLUMNS);
        let row = sqlx::query_as::<_, ResumeRecord>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Resume::try_from).transpose()
    }

    async fn insert_resume(&self, changes: ResumeChanges) -> Result<Resume> {
        let query = format!(
            r#"
            INSERT INTO resumes (name, surname, status, salary, grade, education, experience, portfolio, speciality_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            RESUME_COLUMNS
        );
        let row = sqlx::query_as::<_, ResumeRecord>(&query)
            .bind(changes.name)
            .bind(changes.surname)
            .bind(changes.status.code())
            .bind(changes.salary)
            .bind(changes.grade.code())
            .bind(changes.education)
            .bind(changes.experience)
            .bind(changes.portfolio)
            .bind(changes.speciality_id)
            .bind(changes.user_id)
            .fetch_one(&self.pool)
            .await?;
        Resume::try_from(row)
    }

    async fn update_resume(&self, id: i64, changes: ResumeChanges) -> Result<Resume> {
        let query = format!(
            r#"
            UPDATE resumes
            SET name = $2, surname = $3, status = $4, salary = $5, grade = $6,
                education = $7, experience = $8, portfolio = $9, speciality_id = $10, user_id = $11
            WHERE id = $1
            RETURNING {}
            "#,
            RESUME_COLUMNS
        );
        let row = sqlx::query_as::<_, ResumeRecord>(&query)
            .bind(id)
            .bind(changes.name)
            .bind(changes.surname)
            .bind(changes.status.code())
            .bind(changes.salary)
            .bind(changes.grade.code())
            .bind(changes.education)
            .bind(changes.experience)
            .bind(changes.portfolio)
            .bind(changes.speciality_id)
            .bind(changes.user_id)
            .fetch_one(&self.pool)
            .await?;
        Resume::try_from(row)
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_user(&self, new: NewUser) -> Result<User> {
        let query = format!(
            r#"
            INSERT INTO users (username, first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(new.username)
            .bind(new.first_name)
            .bind(new.last_name)
            .bind(new.email)
            .bind(new.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
