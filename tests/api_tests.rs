// tests/api_tests.rs

use movie_review_backend::{
    config::Config,
    models::movie::NewMovie,
    routes,
    state::AppState,
    store::MovieStore,
};
use serde_json::{Value, json};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345") and the state,
/// so tests can seed movies directly.
async fn spawn_app() -> (String, AppState) {
    let config = Config {
        database_url: None,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        port: 0,
        rust_log: "error".to_string(),
        movie_seed_file: None,
    };

    let state = AppState::in_memory(config);
    let app = routes::create_router(state.clone());

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, state)
}

async fn signup(client: &reqwest::Client, address: &str, user_data: Value) -> reqwest::Response {
    client
        .post(&format!("{}/signup", address))
        .json(&json!({ "userData": user_data }))
        .send()
        .await
        .expect("Failed to execute request")
}

fn user_data(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": "password123",
    })
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn index_answers() {
    let (address, _) = spawn_app().await;

    let response = reqwest::get(&address).await.expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn signup_works() {
    // Arrange
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = signup(&client, &address, user_data("asha", "asha@example.com")).await;

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User Registered");
    assert_eq!(body["user"]["username"], "asha");
    assert!(body["user"]["id"].is_i64());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn signup_duplicate_rules() {
    // Arrange
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    signup(&client, &address, user_data("asha", "asha@example.com")).await;
    signup(&client, &address, user_data("ravi", "ravi@example.com")).await;

    // Act: username and email both taken, by different accounts
    let both = signup(&client, &address, user_data("asha", "ravi@example.com")).await;
    // Act: username alone taken
    let username_only = signup(&client, &address, user_data("asha", "new@example.com")).await;
    // Act: email alone taken
    let email_only = signup(&client, &address, user_data("meera", "asha@example.com")).await;

    // Assert
    assert_eq!(both.status().as_u16(), 500);
    let body: Value = both.json().await.unwrap();
    assert_eq!(body["error"], "User already registered");

    assert_eq!(username_only.status().as_u16(), 500);
    let body: Value = username_only.json().await.unwrap();
    assert_eq!(body["error"], "Username already taken");

    assert_eq!(email_only.status().as_u16(), 201);
}

#[tokio::test]
async fn malformed_body_is_a_500_with_error() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/login", address))
        .json(&json!({ "email": "asha@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn login_and_password_change_flow() {
    // Arrange
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    signup(&client, &address, user_data("asha", "asha@example.com")).await;

    let login = |password: &'static str| {
        let client = client.clone();
        let address = address.clone();
        async move {
            client
                .post(&format!("{}/login", address))
                .json(&json!({ "email": "asha@example.com", "password": password }))
                .send()
                .await
                .expect("Login failed")
        }
    };

    // 1. Login with the initial password
    let response = login("password123").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User Logged In");

    // 2. Wrong password
    let response = login("nope").await;
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Incorrect Password");

    // 3. Change password
    let response = client
        .post(&format!("{}/user/anything/password", address))
        .json(&json!({
            "email": "asha@example.com",
            "currentPassword": "password123",
            "newPassword": "hunter2"
        }))
        .send()
        .await
        .expect("Password change failed");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password Changed Successfully");

    // 4. New password works, old one does not
    assert_eq!(login("hunter2").await.status().as_u16(), 200);
    assert_eq!(login("password123").await.status().as_u16(), 500);
}

#[tokio::test]
async fn login_unknown_email() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/login", address))
        .json(&json!({ "email": "ghost@example.com", "password": "x" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User Not Found or Incorrect Email Entered");
}

#[tokio::test]
async fn profile_picture_and_contact_flow() {
    // Arrange
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();
    signup(
        &client,
        &address,
        json!({
            "username": "asha",
            "email": "a@x.com",
            "password": "pw",
            "phoneNumber": "000"
        }),
    )
    .await;

    // 1. Update the profile picture
    let response = client
        .post(&format!("{}/update-profile-picture", address))
        .json(&json!({ "email": "a@x.com", "newProfilePictureUrl": "http://img/asha.png" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["profilePictureUrl"], "http://img/asha.png");

    // 2. Unknown email is reported, not crashed on
    let response = client
        .post(&format!("{}/update-profile-picture", address))
        .json(&json!({ "email": "ghost@x.com", "newProfilePictureUrl": "http://img/x.png" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User Not Found or Incorrect Email Entered");

    // 3. Contact update only touches patched fields
    let response = client
        .post(&format!("{}/update-contact/a@x.com", address))
        .json(&json!({ "updatedContactDetails": { "phoneNumber": "123", "city": "Pune" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Contact Details Updated");
    assert_eq!(body["user"]["phoneNumber"], "123");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["city"], "Pune");
    assert_eq!(body["user"]["profilePictureUrl"], "http://img/asha.png");

    // 4. Phone lookup finds the new number and not the old one
    let found = client
        .get(&format!("{}/users/phone/123", address))
        .send()
        .await
        .unwrap();
    assert_eq!(found.status().as_u16(), 200);
    let body: Value = found.json().await.unwrap();
    assert_eq!(body["message"], "User Found");
    assert_eq!(body["user"]["username"], "asha");

    let missing = client
        .get(&format!("{}/users/phone/000", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 500);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "Phone number not associated with any user");

    // 5. Contact update on an unknown email
    let response = client
        .post(&format!("{}/update-contact/ghost@x.com", address))
        .json(&json!({ "updatedContactDetails": { "phoneNumber": "1" } }))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Email Not Found");
}

#[tokio::test]
async fn review_flow() {
    // Arrange
    let (address, state) = spawn_app().await;
    let client = reqwest::Client::new();

    let movie = state
        .movies
        .create(NewMovie::new("Lagaan", 2001, "Ashutosh Gowariker", "Hindi"))
        .await
        .unwrap();

    let body: Value = signup(
        &client,
        &address,
        json!({
            "username": "asha",
            "email": "a@x.com",
            "password": "pw",
            "profilePictureUrl": "http://img/asha.png"
        }),
    )
    .await
    .json()
    .await
    .unwrap();
    let user_id = body["user"]["id"].as_i64().unwrap();

    // 1. Add five reviews
    for i in 1..=5 {
        let response = client
            .post(&format!("{}/movies/{}/rating", address, movie.id))
            .json(&json!({
                "reviewData": { "rating": 7, "userId": user_id, "review": format!("r{}", i) }
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 201);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Review Added");
        assert_eq!(body["movie"]["ratings"].as_array().unwrap().len(), i);
        assert_eq!(body["movie"]["reviews"][0]["user"]["username"], "asha");
        assert_eq!(
            body["movie"]["reviews"][0]["user"]["profilePictureUrl"],
            "http://img/asha.png"
        );
    }

    // 2. The listing returns the first three, in order
    let response = client
        .get(&format!("{}/movies/{}/reviews", address, movie.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Reviews Found");

    let reviews = body["reviews"].as_array().unwrap();
    let texts: Vec<&str> = reviews.iter().map(|r| r["review"].as_str().unwrap()).collect();
    assert_eq!(texts, ["r1", "r2", "r3"]);
    assert_eq!(reviews[0]["user"]["username"], "asha");
}

#[tokio::test]
async fn review_failures_collapse_to_movie_not_found() {
    let (address, state) = spawn_app().await;
    let client = reqwest::Client::new();
    let movie = state
        .movies
        .create(NewMovie::new("Dangal", 2016, "Nitesh Tiwari", "Hindi"))
        .await
        .unwrap();

    let cases = [
        (format!("{}/movies/999/rating", address), json!(5)),
        (format!("{}/movies/not-an-id/rating", address), json!(5)),
        (format!("{}/movies/{}/rating", address, movie.id), json!(11)),
    ];

    for (url, rating) in cases {
        let response = client
            .post(&url)
            .json(&json!({ "reviewData": { "rating": rating, "userId": 1, "review": "x" } }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Movie Not Found");
    }

    // reviewData missing, of the wrong shape, or with a mistyped field
    let bodies = [
        json!({}),
        json!({ "reviewData": { "rating": 5, "userId": "abc", "review": "x" } }),
        json!({ "reviewData": { "userId": 1, "review": "x" } }),
        json!([1, 2, 3]),
    ];

    for body in bodies {
        let response = client
            .post(&format!("{}/movies/{}/rating", address, movie.id))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Movie Not Found");
    }

    // A review without text is still accepted
    let response = client
        .post(&format!("{}/movies/{}/rating", address, movie.id))
        .json(&json!({ "reviewData": { "rating": 4, "userId": 1 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let response = client
        .get(&format!("{}/movies/999/reviews", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Movie Not Found");
}
