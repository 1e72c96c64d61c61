//! Typed calls for the record endpoints and login.
//!
//! | Call              | Route                               |
//! |-------------------|-------------------------------------|
//! | `fetch_records`   | `GET /api/{entity}`                 |
//! | `create_record`   | `POST /api/{entity}`                |
//! | `update_status`   | `PATCH /api/{entity}/{id}/status`   |
//! | `delete_record`   | `DELETE /api/{entity}/{id}`         |
//! | `login`           | `POST /api/auth/login`              |
//! | `change_password` | `POST /api/auth/password`           |

use super::envelope::{expect_success, parse_envelope};
use super::{ApiClient, Method};
use crate::auth::LoginResponse;
use crate::error::Result;
use crate::record::Record;
use crate::validation::{LoginForm, PasswordChange};
use serde_json::json;
use tracing::info;

fn collection_path<R: Record>() -> String {
    format!("/api/{}", R::PROFILE.endpoint)
}

fn item_path<R: Record>(id: u64) -> String {
    format!("/api/{}/{}", R::PROFILE.endpoint, id)
}

pub fn fetch_records<R: Record>(client: &dyn ApiClient) -> Result<Vec<R>> {
    let what = format!("load {}", R::PROFILE.title.to_lowercase());
    let body = client.send(Method::Get, &collection_path::<R>(), None)?;
    let records: Vec<R> = parse_envelope(body, &what)?;
    info!(entity = R::PROFILE.endpoint, count = records.len(), "records fetched");
    Ok(records)
}

/// Returns the record as stored by the backend (which may assign the id).
pub fn create_record<R: Record>(client: &dyn ApiClient, record: &R) -> Result<R> {
    let body = serde_json::to_value(record)?;
    let resp = client.send(Method::Post, &collection_path::<R>(), Some(&body))?;
    parse_envelope(resp, "create record")
}

pub fn update_status<R: Record>(client: &dyn ApiClient, id: u64, status: &str) -> Result<R> {
    let path = format!("{}/status", item_path::<R>(id));
    let body = json!({ "status": status });
    let resp = client.send(Method::Patch, &path, Some(&body))?;
    parse_envelope(resp, "update status")
}

pub fn delete_record<R: Record>(client: &dyn ApiClient, id: u64) -> Result<()> {
    let resp = client.send(Method::Delete, &item_path::<R>(id), None)?;
    expect_success(resp, "delete record")
}

/// Validates the form before anything is sent.
pub fn login(client: &dyn ApiClient, form: &LoginForm) -> Result<LoginResponse> {
    form.validate()?;
    let body = json!({ "email": form.email.trim(), "password": form.password });
    let resp = client.send(Method::Post, "/api/auth/login", Some(&body))?;
    parse_envelope(resp, "login")
}

/// Change the password of `email`. The form is validated first, so a weak
/// or mismatched password never reaches the backend.
pub fn change_password(client: &dyn ApiClient, email: &str, form: &PasswordChange) -> Result<()> {
    form.validate()?;
    let body = json!({
        "email": email,
        "currentPassword": form.current,
        "newPassword": form.new,
    });
    let resp = client.send(Method::Post, "/api/auth/password", Some(&body))?;
    expect_success(resp, "change password")?;
    info!(%email, "password changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::error::Error;
    use crate::record::{CarUser, CarUserStatus, Order};
    use crate::test_utils::{MockApiClient, MockResponse};

    #[test]
    fn test_fetch_records() {
        let users = serde_json::to_value(CarUser::fixtures()).unwrap();
        let client = MockApiClient::with_bodies(vec![MockApiClient::ok(users)]);
        let fetched: Vec<CarUser> = fetch_records(&client).unwrap();
        assert_eq!(fetched, CarUser::fixtures());

        let requests = client.requests();
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/api/car-users");
        assert!(requests[0].body.is_none());
    }

    #[test]
    fn test_fetch_failure_message_surfaces() {
        let client = MockApiClient::with_bodies(vec![MockApiClient::fail("Database offline")]);
        let err = fetch_records::<Order>(&client).unwrap_err();
        assert_eq!(err.to_string(), "Database offline");
    }

    #[test]
    fn test_http_status_error_passes_through() {
        let client = MockApiClient::new(vec![MockResponse::Status(401, "Unauthorized".into())]);
        assert!(matches!(
            fetch_records::<Order>(&client),
            Err(Error::Status { status: 401, .. })
        ));
    }

    #[test]
    fn test_update_status_body() {
        let mut updated = CarUser::fixtures()[0].clone();
        updated.status = CarUserStatus::Suspended;
        let client =
            MockApiClient::with_bodies(vec![MockApiClient::ok(serde_json::to_value(&updated).unwrap())]);

        let result: CarUser = update_status(&client, 1, "Suspended").unwrap();
        assert_eq!(result.status, CarUserStatus::Suspended);

        let request = &client.requests()[0];
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "/api/car-users/1/status");
        assert_eq!(request.body, Some(json!({"status": "Suspended"})));
    }

    #[test]
    fn test_create_and_delete() {
        let user = CarUser::fixtures()[1].clone();
        let client = MockApiClient::with_bodies(vec![
            MockApiClient::ok(serde_json::to_value(&user).unwrap()),
            json!({"success": true, "message": "deleted"}),
        ]);
        let created = create_record(&client, &user).unwrap();
        assert_eq!(created, user);
        delete_record::<CarUser>(&client, user.id).unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].body.as_ref().unwrap()["joinDate"], json!(user.join_date));
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].path, "/api/car-users/2");
    }

    #[test]
    fn test_login() {
        let client = MockApiClient::with_bodies(vec![MockApiClient::ok(json!({
            "token": "t-1",
            "user": {"id": 1, "name": "Admin", "email": "admin@autohub.lk", "role": "admin"}
        }))]);
        let form = LoginForm {
            email: " admin@autohub.lk ".to_string(),
            password: "Admin123".to_string(),
        };
        let resp = login(&client, &form).unwrap();
        assert_eq!(resp.token, "t-1");
        assert_eq!(resp.user.role, Role::Admin);
        assert_eq!(
            client.requests()[0].body,
            Some(json!({"email": "admin@autohub.lk", "password": "Admin123"}))
        );
    }

    #[test]
    fn test_change_password() {
        let client = MockApiClient::default();
        let form = PasswordChange {
            current: "Admin123".to_string(),
            new: "Garage2024".to_string(),
            confirm: "Garage2024".to_string(),
        };
        change_password(&client, "admin@autohub.lk", &form).unwrap();
        let request = &client.requests()[0];
        assert_eq!(request.path, "/api/auth/password");
        assert_eq!(
            request.body,
            Some(json!({
                "email": "admin@autohub.lk",
                "currentPassword": "Admin123",
                "newPassword": "Garage2024"
            }))
        );
    }

    #[test]
    fn test_change_password_weak_is_not_sent() {
        let client = MockApiClient::default();
        let form = PasswordChange {
            current: "Admin123".to_string(),
            new: "garage".to_string(),
            confirm: "garage".to_string(),
        };
        assert!(matches!(
            change_password(&client, "admin@autohub.lk", &form),
            Err(Error::Validation(_))
        ));
        assert!(client.requests().is_empty());
    }

    #[test]
    fn test_login_rejects_invalid_form_without_sending() {
        let client = MockApiClient::default();
        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        assert!(matches!(login(&client, &form), Err(Error::Validation(_))));
        assert!(client.requests().is_empty());
    }
}
