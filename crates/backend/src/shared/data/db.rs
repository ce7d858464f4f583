use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Database connection already initialized"))?;

    tracing::info!("Database initialized at {}", db_url);
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection not initialized. Call initialize_database() first")
}

/// Ensure required tables and natural-key indexes exist (minimal schema bootstrap)
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS a001_mandate (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            address TEXT NOT NULL DEFAULT '',
            default_hourly_rate REAL,
            total_revenue REAL NOT NULL DEFAULT 0,
            last_entry_date TEXT,
            total_payroll_cost REAL NOT NULL DEFAULT 0,
            last_payroll_calculation TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a002_employee (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            external_id TEXT,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            hourly_rate REAL,
            position TEXT NOT NULL DEFAULT '',
            is_active INTEGER NOT NULL DEFAULT 1,
            mandate_ref TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_a002_employee_mandate
            ON a002_employee (mandate_ref);
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a003_time_record (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            employee_ref TEXT NOT NULL,
            mandate_ref TEXT NOT NULL,
            work_date TEXT NOT NULL,
            clock_in TEXT,
            clock_out TEXT,
            break_minutes INTEGER NOT NULL DEFAULT 0,
            worked_hours REAL NOT NULL DEFAULT 0,
            is_overtime INTEGER NOT NULL DEFAULT 0,
            hourly_rate_used REAL,
            import_source TEXT NOT NULL DEFAULT '',
            import_batch_ref TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        // Натуральный ключ записи времени: сотрудник + дата + заведение
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_a003_time_record_natural_key
            ON a003_time_record (employee_ref, work_date, mandate_ref);
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a004_payroll_entry (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            employee_ref TEXT NOT NULL,
            mandate_ref TEXT NOT NULL,
            period_start TEXT NOT NULL,
            period_end TEXT NOT NULL,
            period_type TEXT NOT NULL,
            regular_hours REAL NOT NULL DEFAULT 0,
            overtime_hours REAL NOT NULL DEFAULT 0,
            total_hours REAL NOT NULL DEFAULT 0,
            hourly_rate REAL NOT NULL DEFAULT 0,
            base_salary REAL NOT NULL DEFAULT 0,
            overtime_pay REAL NOT NULL DEFAULT 0,
            total_gross REAL NOT NULL DEFAULT 0,
            social_charges REAL NOT NULL DEFAULT 0,
            total_cost REAL NOT NULL DEFAULT 0,
            is_locked INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        // Натуральный ключ зарплатной записи: сотрудник + заведение + начало периода + тип
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_a004_payroll_entry_natural_key
            ON a004_payroll_entry (employee_ref, mandate_ref, period_start, period_type);
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a005_manual_payroll_entry (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            mandate_ref TEXT NOT NULL,
            year INTEGER NOT NULL,
            month INTEGER NOT NULL,
            total_hours REAL NOT NULL DEFAULT 0,
            total_gross REAL NOT NULL DEFAULT 0,
            social_charges REAL NOT NULL DEFAULT 0,
            total_cost REAL NOT NULL DEFAULT 0,
            employee_count INTEGER NOT NULL DEFAULT 0,
            source TEXT NOT NULL DEFAULT '',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        // Натуральный ключ ручной записи: заведение + год + месяц
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_a005_manual_payroll_natural_key
            ON a005_manual_payroll_entry (mandate_ref, year, month);
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a006_import_history (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            mandate_ref TEXT NOT NULL,
            file_name TEXT NOT NULL DEFAULT '',
            import_kind TEXT NOT NULL DEFAULT '',
            period_label TEXT NOT NULL DEFAULT '',
            period_start TEXT,
            period_end TEXT,
            total_rows INTEGER NOT NULL DEFAULT 0,
            created_count INTEGER NOT NULL DEFAULT 0,
            updated_count INTEGER NOT NULL DEFAULT 0,
            skipped_count INTEGER NOT NULL DEFAULT 0,
            error_count INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'PENDING',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a006_import_match_row (
            id TEXT PRIMARY KEY NOT NULL,
            import_ref TEXT NOT NULL,
            raw_external_id TEXT,
            raw_first_name TEXT NOT NULL DEFAULT '',
            raw_last_name TEXT NOT NULL DEFAULT '',
            matched_employee_ref TEXT,
            match_type TEXT NOT NULL,
            confidence INTEGER NOT NULL DEFAULT 0,
            needs_review INTEGER NOT NULL DEFAULT 0,
            total_hours REAL NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_a006_import_match_row_import
            ON a006_import_match_row (import_ref);
        "#,
    ];

    for sql in statements {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }

    Ok(())
}
