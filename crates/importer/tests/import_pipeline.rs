//! Database-gated pipeline tests. Each test provisions a fresh schema via
//! sqlx's test harness and needs a running Postgres (`DATABASE_URL`):
//!
//!     cargo test -p importer -- --ignored

use rust_decimal::Decimal;
use sqlx::PgPool;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

use importer::commit::SCORE_TABLE_MISMATCH_WARNING;
use importer::{
    Apparatus, DetailParser, ImportCommitter, ImportContext, ImporterError, ListingParser,
    MeetDetail, MeetImporter, MeetSummary, MsoClient, MsoImporter, Result, ScrapedScore,
};
use storage::StorageError;
use storage::dto::{NewCompetition, NewScore};

async fn seed_gymnast(pool: &PgPool, user_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO gymnasts (user_id, name) VALUES ($1, $2) RETURNING gymnast_id",
    )
    .bind(user_id)
    .bind("Riley")
    .fetch_one(pool)
    .await
    .unwrap()
}

fn competition(user_id: Uuid, gymnast_id: Uuid, name: &str) -> NewCompetition {
    NewCompetition {
        user_id,
        gymnast_id,
        name: name.to_string(),
        level: Some("Level 7".to_string()),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 5),
        end_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 7),
        all_around_place: Some(2),
    }
}

async fn competition_count(pool: &PgPool, gymnast_id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM competitions WHERE gymnast_id = $1")
        .bind(gymnast_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn score_count(pool: &PgPool, gymnast_id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM scores s
        JOIN competitions c ON c.competition_id = s.competition_id
        WHERE c.gymnast_id = $1
        "#,
    )
    .bind(gymnast_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn empty_score_list_commits_competition_with_warning(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let gymnast_id = seed_gymnast(&pool, user_id).await;

    let outcome = ImportCommitter::new(&pool)
        .commit(&competition(user_id, gymnast_id, "Winter Classic"), &[])
        .await
        .unwrap();

    assert_eq!(
        outcome.warnings,
        vec![SCORE_TABLE_MISMATCH_WARNING.to_string()]
    );
    assert_eq!(competition_count(&pool, gymnast_id).await, 1);
    assert_eq!(score_count(&pool, gymnast_id).await, 0);
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn committed_scores_land_with_the_competition(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let gymnast_id = seed_gymnast(&pool, user_id).await;

    let scores = vec![
        NewScore {
            apparatus: "floor_exercise".to_string(),
            value: Some(Decimal::new(135, 1)),
            place: Some(1),
            start_value: None,
        },
        NewScore {
            apparatus: "vault".to_string(),
            value: Some(Decimal::new(1295, 2)),
            place: Some(3),
            start_value: None,
        },
    ];

    let outcome = ImportCommitter::new(&pool)
        .commit(&competition(user_id, gymnast_id, "Winter Classic"), &scores)
        .await
        .unwrap();

    assert!(outcome.is_clean());
    assert_eq!(competition_count(&pool, gymnast_id).await, 1);
    assert_eq!(score_count(&pool, gymnast_id).await, 2);
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn failed_score_write_rolls_back_the_competition(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let gymnast_id = seed_gymnast(&pool, user_id).await;

    // NUMERIC(6, 3) overflows at 1000, so this write fails at the score
    // step, after the competition insert has already succeeded in the
    // transaction.
    let scores = vec![NewScore {
        apparatus: "vault".to_string(),
        value: Some(Decimal::from(99_999)),
        place: Some(1),
        start_value: None,
    }];

    let result = ImportCommitter::new(&pool)
        .commit(&competition(user_id, gymnast_id, "Winter Classic"), &scores)
        .await;

    assert!(result.is_err());
    assert_eq!(competition_count(&pool, gymnast_id).await, 0);
    assert_eq!(score_count(&pool, gymnast_id).await, 0);
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn unknown_gymnast_is_a_constraint_violation(pool: PgPool) {
    let result = ImportCommitter::new(&pool)
        .commit(
            &competition(Uuid::new_v4(), Uuid::new_v4(), "Winter Classic"),
            &[],
        )
        .await;

    assert!(matches!(
        result,
        Err(ImporterError::Storage(StorageError::ConstraintViolation(_)))
    ));
}

// ---------------------------------------------------------------------------
// Facade tests with substituted parsers: the selector-coupled layer is
// replaced by canned doubles and the client is pointed at a local fixture
// server, so nothing depends on the real site's markup.
// ---------------------------------------------------------------------------

struct CannedListing(Vec<MeetSummary>);

impl ListingParser for CannedListing {
    fn parse(&self, _html: &str) -> Result<Vec<MeetSummary>> {
        Ok(self.0.clone())
    }
}

struct EchoDetail;

impl DetailParser for EchoDetail {
    fn parse(&self, _html: &str, summary: &MeetSummary) -> Result<MeetDetail> {
        Ok(MeetDetail {
            name: summary.name.clone(),
            raw_date_text: summary.raw_date_text.clone(),
            scores: vec![ScrapedScore {
                apparatus: Apparatus::Vault,
                value: Decimal::new(135, 1),
                place: Some(1),
            }],
            all_around_place: Some(2),
        })
    }
}

/// Serve a fixed HTML body on a loopback port for every request.
async fn fixture_server(body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    format!("http://{addr}")
}

fn canned_summary(external_id: &str, name: &str, base_url: &str) -> MeetSummary {
    MeetSummary {
        external_id: external_id.to_string(),
        name: name.to_string(),
        level: "Level 7".to_string(),
        raw_date_text: "Jan 5, 2024".to_string(),
        details_url: format!("{base_url}{external_id}"),
        already_imported: false,
    }
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn facade_flags_imported_meets_on_the_next_listing(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let gymnast_id = seed_gymnast(&pool, user_id).await;

    let base_url = fixture_server("<html></html>").await;
    let summaries = vec![
        canned_summary("/results/100", "Winter Classic", &base_url),
        canned_summary("/results/101", "Spring Cup", &base_url),
    ];

    let mso = MsoImporter::new()
        .with_client(MsoClient::with_base_url(base_url.clone()))
        .with_parsers(Box::new(CannedListing(summaries)), Box::new(EchoDetail));
    let context = ImportContext { pool };

    let listed = mso
        .fetch_meet_list("1234", gymnast_id, &context)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|s| !s.already_imported));

    let outcome = mso
        .import_meet(&listed[0], user_id, gymnast_id, &context)
        .await
        .unwrap();
    assert!(outcome.is_clean());

    let listed = mso
        .fetch_meet_list("1234", gymnast_id, &context)
        .await
        .unwrap();
    assert!(listed[0].already_imported);
    assert!(!listed[1].already_imported);
}
