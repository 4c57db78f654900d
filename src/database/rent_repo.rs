use sqlx::SqlitePool;

const SQL_INSERT_RENT_CHECK: &str = r#"
INSERT INTO rent_checks (id, user_id, postcode, bedrooms, estimated_rent)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const SQL_INSERT_CONTRACT: &str = r#"
INSERT INTO rental_contracts (id, user_id, original_text, analysis_result)
VALUES (?1, ?2, ?3, ?4)
"#;

const SQL_INSERT_DECLARATION_CHECK: &str = r#"
INSERT INTO rent_declaration_checks (
  id,
  user_id,
  postcode,
  bedrooms,
  actual_rent_paid,
  council_tax_band,
  estimated_council_tax,
  discrepancy_found,
  analysis_result
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub async fn insert_rent_check(
    pool: &SqlitePool,
    id: &str,
    user_id: Option<&str>,
    postcode: &str,
    bedrooms: &str,
    estimated_rent: Option<f64>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_RENT_CHECK)
        .bind(id)
        .bind(user_id)
        .bind(postcode)
        .bind(bedrooms)
        .bind(estimated_rent)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_contract_analysis(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    original_text: &str,
    analysis_result: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_CONTRACT)
        .bind(id)
        .bind(user_id)
        .bind(original_text)
        .bind(analysis_result)
        .execute(pool)
        .await?;
    Ok(())
}

pub struct NewDeclarationCheck<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub postcode: &'a str,
    pub bedrooms: &'a str,
    pub actual_rent_paid: f64,
    pub council_tax_band: Option<&'a str>,
    pub estimated_council_tax: Option<f64>,
    pub discrepancy_found: bool,
    pub analysis_result: Option<&'a str>,
}

pub async fn insert_declaration_check(
    pool: &SqlitePool,
    check: NewDeclarationCheck<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_DECLARATION_CHECK)
        .bind(check.id)
        .bind(check.user_id)
        .bind(check.postcode)
        .bind(check.bedrooms)
        .bind(check.actual_rent_paid)
        .bind(check.council_tax_band)
        .bind(check.estimated_council_tax)
        .bind(check.discrepancy_found as i64)
        .bind(check.analysis_result)
        .execute(pool)
        .await?;
    Ok(())
}
