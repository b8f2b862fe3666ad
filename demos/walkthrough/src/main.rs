use std::env;

use dormdesk::prelude::*;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

struct Settings {
    base_url: String,
    session_file: String,
    credentials: Option<(String, String)>,
}

impl Settings {
    /// `DORMDESK_URL`, `DORMDESK_SESSION_FILE`, `DORMDESK_USERNAME`,
    /// `DORMDESK_PASSWORD`. Login is skipped unless both credentials are set.
    fn from_env() -> Self {
        let credentials = match (env::var("DORMDESK_USERNAME"), env::var("DORMDESK_PASSWORD")) {
            (Ok(user), Ok(password)) => Some((user, password)),
            _ => None,
        };
        Self {
            base_url: env::var("DORMDESK_URL").unwrap_or_else(|_| "http://localhost:8000".into()),
            session_file: env::var("DORMDESK_SESSION_FILE")
                .unwrap_or_else(|_| "dormdesk-session.json".into()),
            credentials,
        }
    }
}

// ---------------------------------------------------------------------------
// Walkthrough
// ---------------------------------------------------------------------------

/// Logs in (if asked to), visits the role's views, pokes at the other
/// role's area to show the guard, then logs out.
async fn walkthrough<T, N, K>(
    client: &DormClient<T, N, K>,
    credentials: Option<(&str, &str)>,
) -> Result<(), DormdeskError>
where
    T: HttpTransport,
    N: Notifier,
    K: KeyValueStore,
{
    let landing = client.navigate("/").await?;
    tracing::info!(path = %landing.path, "landed");

    if let Some((user, password)) = credentials {
        client.auth().login(user, password).await?;
    }

    let session = client.session().await;
    let Some(role) = session.role() else {
        tracing::info!("not logged in, nothing else to show");
        return Ok(());
    };

    match role {
        Role::Student => {
            let profile = client.student().profile().await?;
            tracing::info!(name = %profile.name, college = %profile.college, "profile");
            let unpaid = client.student().bills(Some(BillStatus::Unpaid)).await?;
            tracing::info!(count = unpaid.len(), "unpaid bills");
        }
        Role::Admin => {
            let stats = client.admin().statistics().await?;
            tracing::info!(
                students = stats.students.total,
                occupancy = stats.dormitories.occupancy_rate,
                pending_changes = stats.requests.pending_dorm_changes,
                "statistics"
            );
        }
    }

    let other_area = match role {
        Role::Student => "/admin/students",
        Role::Admin => "/student/bills",
    };
    let bounced = client.navigate(other_area).await?;
    tracing::info!(asked = other_area, landed = %bounced.path, "guard redirect");

    client.auth().logout().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = Settings::from_env();
    tracing::info!(url = %settings.base_url, session = %settings.session_file, "starting walkthrough");

    let client = DormClient::builder()
        .base_url(&settings.base_url)
        .build(LogNotifier, FileStore::open(&settings.session_file)?)?;

    let credentials = settings
        .credentials
        .as_ref()
        .map(|(user, password)| (user.as_str(), password.as_str()));
    walkthrough(&client, credentials).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, verb: &str, route: &str, body: serde_json::Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_walkthrough_admin_ends_logged_out() {
        let server = MockServer::start().await;
        mount(
            &server,
            "POST",
            "/api/auth/login",
            json!({"access_token": "t1", "token_type": "bearer", "user_type": "admin", "user_id": "a1"}),
        )
        .await;
        mount(
            &server,
            "GET",
            "/api/admin/statistics",
            json!({
                "students": {"total": 120, "with_dorm": 100, "without_dorm": 20},
                "dormitories": {"total": 30, "total_beds": 120, "occupied_beds": 100, "vacant_beds": 20, "occupancy_rate": 83.33},
                "requests": {"pending_dorm_changes": 2, "pending_maintenance": 5},
                "bills": {"unpaid_count": 7, "unpaid_amount": 1400.0}
            }),
        )
        .await;
        mount(&server, "POST", "/api/auth/logout", json!({"message": "ok"})).await;

        let client = DormClient::builder()
            .base_url(&server.uri())
            .build(MemoryNotifier::new(), MemoryStore::new())
            .unwrap();

        walkthrough(&client, Some(("admin", "admin123"))).await.unwrap();

        assert!(client.session().await.is_anonymous());
        assert_eq!(client.current_location().await.as_deref(), Some("/login"));
        assert_eq!(client.notifier().messages(), vec!["Login successful".to_string()]);
    }

    #[tokio::test]
    async fn test_walkthrough_without_credentials_stays_on_login() {
        let server = MockServer::start().await;
        let client = DormClient::builder()
            .base_url(&server.uri())
            .build(MemoryNotifier::new(), MemoryStore::new())
            .unwrap();

        walkthrough(&client, None).await.unwrap();

        assert_eq!(client.current_location().await.as_deref(), Some("/login"));
    }
}
