//! Integration tests for the placeholder auth endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::util::ServiceExt;

    use crate::test_utils::{UNREACHABLE_BACKEND, body_to_json, get, test_app, test_config};

    fn token_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .uri("/auth/token")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={username}&password={password}")))
            .unwrap()
    }

    fn with_token(mut request: Request<Body>, token: &str) -> Request<Body> {
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );
        request
    }

    /// Tests a token is issued for the demo user
    #[tokio::test]
    async fn it_issues_token() {
        let app = test_app(test_config(UNREACHABLE_BACKEND));

        let response = app
            .oneshot(token_request("testuser", "fakehashedpassword"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["access_token"], "testuser");
        assert_eq!(body["token_type"], "bearer");
    }

    /// Tests bad credentials are rejected
    #[tokio::test]
    async fn it_rejects_wrong_password() {
        let app = test_app(test_config(UNREACHABLE_BACKEND));

        let response = app
            .oneshot(token_request("testuser", "wrongpassword"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
        let body = body_to_json(response.into_body()).await;
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .contains("Incorrect username or password")
        );
    }

    /// Tests the user behind a valid token is returned
    #[tokio::test]
    async fn it_reads_current_user() {
        let app = test_app(test_config(UNREACHABLE_BACKEND));

        let response = app
            .oneshot(with_token(get("/auth/users/me"), "testuser"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["username"], "testuser");
        assert_eq!(body["email"], "test@example.com");
        assert!(body.get("password").is_none());
    }

    /// Tests an unknown token is rejected
    #[tokio::test]
    async fn it_rejects_invalid_token() {
        let app = test_app(test_config(UNREACHABLE_BACKEND));

        let response = app
            .oneshot(with_token(get("/auth/users/me"), "invalidtoken"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_to_json(response.into_body()).await;
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .contains("Invalid authentication credentials")
        );
    }

    /// Tests a request without any token is rejected
    #[tokio::test]
    async fn it_rejects_missing_token() {
        let app = test_app(test_config(UNREACHABLE_BACKEND));

        let response = app.oneshot(get("/auth/users/me")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["detail"], "Not authenticated");
    }
}
