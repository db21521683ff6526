use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{NewSurvey, SurveyRecord};

/// Append-only access to the `surveys` table.
#[derive(Clone, Debug)]
pub struct SurveyStore {
    pool: SqlitePool,
}

impl SurveyStore {
    /// Opens the database at `url`, creating the file if it does not exist.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url {url}"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database {url}"))?;

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn append(&self, survey: &NewSurvey) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO surveys (
                full_name, email, date_of_birth, contact_number,
                fav_food_pizza, fav_food_pasta, fav_food_pap_wors, fav_food_other,
                movies_rating, radio_rating, eat_out_rating, tv_rating
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&survey.full_name)
        .bind(&survey.email)
        .bind(&survey.date_of_birth)
        .bind(&survey.contact_number)
        .bind(flag(survey.fav_food_pizza))
        .bind(flag(survey.fav_food_pasta))
        .bind(flag(survey.fav_food_pap_wors))
        .bind(flag(survey.fav_food_other))
        .bind(survey.movies_rating)
        .bind(survey.radio_rating)
        .bind(survey.eat_out_rating)
        .bind(survey.tv_rating)
        .execute(&self.pool)
        .await?;

        debug!(id = result.last_insert_rowid(), "survey appended");
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<SurveyRecord>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, full_name, email, date_of_birth, contact_number, \
             fav_food_pizza, fav_food_pasta, fav_food_pap_wors, fav_food_other, \
             movies_rating, radio_rating, eat_out_rating, tv_rating \
             FROM surveys",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut surveys = Vec::with_capacity(rows.len());
        for row in rows {
            surveys.push(record_from_row(&row)?);
        }

        Ok(surveys)
    }

    pub async fn seed(&self) -> anyhow::Result<usize> {
        let samples = [
            (
                "Thabo Nkosi",
                "thabo.nkosi@example.com",
                "1988-02-11",
                "0821110001",
                (true, false, true, false),
                [1, 2, 2, 3],
            ),
            (
                "Amahle Dlamini",
                "amahle.dlamini@example.com",
                "1999-07-23",
                "0832220002",
                (true, true, false, false),
                [2, 4, 1, 2],
            ),
            (
                "Pieter van Wyk",
                "pieter.vanwyk@example.com",
                "1975-11-05",
                "0843330003",
                (false, false, true, true),
                [3, 1, 4, 3],
            ),
            (
                "Naledi Khumalo",
                "naledi.khumalo@example.com",
                "2004-04-30",
                "0724440004",
                (false, true, false, false),
                [1, 5, 2, 1],
            ),
        ];
        let count = samples.len();

        for (name, email, date_of_birth, contact, (pizza, pasta, pap_wors, other), ratings) in samples {
            let survey = NewSurvey {
                full_name: Some(name.to_string()),
                email: Some(email.to_string()),
                date_of_birth: Some(date_of_birth.to_string()),
                contact_number: Some(contact.to_string()),
                fav_food_pizza: pizza,
                fav_food_pasta: pasta,
                fav_food_pap_wors: pap_wors,
                fav_food_other: other,
                movies_rating: ratings[0],
                radio_rating: ratings[1],
                eat_out_rating: ratings[2],
                tv_rating: ratings[3],
            };
            self.append(&survey).await?;
        }

        info!(count, "seed surveys inserted");
        Ok(count)
    }

    pub async fn import_csv(&self, csv_path: &Path) -> anyhow::Result<usize> {
        #[derive(serde::Deserialize)]
        struct CsvRow {
            full_name: String,
            email: String,
            date_of_birth: String,
            contact_number: String,
            #[serde(default)]
            fav_food_pizza: String,
            #[serde(default)]
            fav_food_pasta: String,
            #[serde(default)]
            fav_food_pap_wors: String,
            #[serde(default)]
            fav_food_other: String,
            movies_rating: i64,
            radio_rating: i64,
            eat_out_rating: i64,
            tv_rating: i64,
        }

        let mut reader = csv::Reader::from_path(csv_path)
            .with_context(|| format!("failed to open {}", csv_path.display()))?;
        let mut inserted = 0usize;

        for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = result.with_context(|| format!("invalid csv row {}", index + 1))?;
            let survey = NewSurvey {
                full_name: Some(row.full_name),
                email: Some(row.email),
                date_of_birth: Some(row.date_of_birth),
                contact_number: Some(row.contact_number),
                fav_food_pizza: csv_flag(&row.fav_food_pizza),
                fav_food_pasta: csv_flag(&row.fav_food_pasta),
                fav_food_pap_wors: csv_flag(&row.fav_food_pap_wors),
                fav_food_other: csv_flag(&row.fav_food_other),
                movies_rating: row.movies_rating,
                radio_rating: row.radio_rating,
                eat_out_rating: row.eat_out_rating,
                tv_rating: row.tv_rating,
            };
            self.append(&survey).await?;
            inserted += 1;
        }

        Ok(inserted)
    }
}

fn flag(value: bool) -> i64 {
    i64::from(value)
}

fn csv_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "n"
    )
}

fn record_from_row(row: &SqliteRow) -> Result<SurveyRecord, StorageError> {
    Ok(SurveyRecord {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        date_of_birth: row.try_get("date_of_birth")?,
        contact_number: row.try_get("contact_number")?,
        fav_food_pizza: row.try_get("fav_food_pizza")?,
        fav_food_pasta: row.try_get("fav_food_pasta")?,
        fav_food_pap_wors: row.try_get("fav_food_pap_wors")?,
        fav_food_other: row.try_get("fav_food_other")?,
        movies_rating: row.try_get("movies_rating")?,
        radio_rating: row.try_get("radio_rating")?,
        eat_out_rating: row.try_get("eat_out_rating")?,
        tv_rating: row.try_get("tv_rating")?,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) async fn memory_store() -> SurveyStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SurveyStore::from_pool(pool);
        store.init().await.unwrap();
        store
    }

    pub(crate) fn sample_survey() -> NewSurvey {
        NewSurvey {
            full_name: Some("Zanele Mthembu".to_string()),
            email: Some("zanele@example.com".to_string()),
            date_of_birth: Some("1992-08-19".to_string()),
            contact_number: Some("0825550199".to_string()),
            fav_food_pizza: true,
            fav_food_pasta: false,
            fav_food_pap_wors: true,
            fav_food_other: false,
            movies_rating: 2,
            radio_rating: 4,
            eat_out_rating: 1,
            tv_rating: 5,
        }
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty() {
        let store = memory_store().await;
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_then_list_round_trips_fields() {
        let store = memory_store().await;
        store.append(&sample_survey()).await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.full_name, "Zanele Mthembu");
        assert_eq!(record.email, "zanele@example.com");
        assert_eq!(record.date_of_birth, "1992-08-19");
        assert_eq!(record.contact_number, "0825550199");
        assert_eq!(
            (
                record.fav_food_pizza,
                record.fav_food_pasta,
                record.fav_food_pap_wors,
                record.fav_food_other
            ),
            (1, 0, 1, 0)
        );
        assert_eq!(
            (
                record.movies_rating,
                record.radio_rating,
                record.eat_out_rating,
                record.tv_rating
            ),
            (2, 4, 1, 5)
        );
    }

    #[tokio::test]
    async fn identifiers_increase_in_insertion_order() {
        let store = memory_store().await;
        for name in ["first", "second", "third"] {
            let mut survey = sample_survey();
            survey.full_name = Some(name.to_string());
            store.append(&survey).await.unwrap();
        }

        let records = store.list_all().await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert!(records.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[tokio::test]
    async fn repeated_listing_is_stable() {
        let store = memory_store().await;
        store.append(&sample_survey()).await.unwrap();
        store.append(&sample_survey()).await.unwrap();

        let first = store.list_all().await.unwrap();
        let second = store.list_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn content_is_stored_as_is() {
        let store = memory_store().await;
        let mut survey = sample_survey();
        survey.email = Some(String::new());
        survey.date_of_birth = Some("yesterday".to_string());
        survey.radio_rating = 42;
        store.append(&survey).await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records[0].email, "");
        assert_eq!(records[0].date_of_birth, "yesterday");
        assert_eq!(records[0].radio_rating, 42);
    }

    #[tokio::test]
    async fn missing_text_field_is_a_storage_error() {
        let store = memory_store().await;
        let mut survey = sample_survey();
        survey.full_name = None;

        let err = store.append(&survey).await.unwrap_err();
        assert!(err.to_string().contains("NOT NULL"), "{err}");
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn closed_store_reports_storage_errors() {
        let store = memory_store().await;
        store.close().await;
        assert!(store.append(&sample_survey()).await.is_err());
        assert!(store.list_all().await.is_err());
        assert!(store.ping().await.is_err());
    }

    #[tokio::test]
    async fn seed_inserts_sample_surveys() {
        let store = memory_store().await;
        let inserted = store.seed().await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), inserted);
    }

    #[tokio::test]
    async fn import_csv_appends_each_row() {
        let store = memory_store().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surveys.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "full_name,email,date_of_birth,contact_number,fav_food_pizza,fav_food_pasta,\
             fav_food_pap_wors,fav_food_other,movies_rating,radio_rating,eat_out_rating,tv_rating"
        )
        .unwrap();
        writeln!(file, "Bongani Zulu,bongani@example.com,1980-05-05,0811,true,no,1,,1,2,3,4").unwrap();
        writeln!(file, "Karin Botha,karin@example.com,1970-12-24,0822,false,yes,0,TRUE,5,5,5,5").unwrap();
        drop(file);

        let inserted = store.import_csv(&path).await.unwrap();
        assert_eq!(inserted, 2);

        let records = store.list_all().await.unwrap();
        assert_eq!(records[0].fav_food_pizza, 1);
        assert_eq!(records[0].fav_food_pasta, 0);
        assert_eq!(records[0].fav_food_pap_wors, 1);
        assert_eq!(records[0].fav_food_other, 0);
        assert_eq!(records[1].fav_food_pasta, 1);
        assert_eq!(records[1].fav_food_other, 1);
        assert_eq!(records[1].tv_rating, 5);
    }

    #[tokio::test]
    async fn import_csv_rejects_non_numeric_rating() {
        let store = memory_store().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "full_name,email,date_of_birth,contact_number,fav_food_pizza,fav_food_pasta,\
             fav_food_pap_wors,fav_food_other,movies_rating,radio_rating,eat_out_rating,tv_rating\n\
             Ann,ann@example.com,1990-01-01,0800,1,0,0,0,lots,2,3,4\n",
        )
        .unwrap();

        assert!(store.import_csv(&path).await.is_err());
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
