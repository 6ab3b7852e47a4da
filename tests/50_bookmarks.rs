mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{names, restaurant, TestServer};
use restaurant_api::database::Store;

#[tokio::test]
async fn bookmarking_twice_keeps_one_record() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token().await?;
    let id = server
        .add_restaurant(&admin, restaurant("Dishoom", "Indian", "London", &[]))
        .await?;
    let user = server.user_token("sam@example.com", "Sam", "Lee").await?;

    let (status, body) = server.post("/bookmarks", Some(&user), json!({ "restaurant_id": id })).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Restaurant bookmarked!");

    let (status, body) = server.post("/bookmarks", Some(&user), json!({ "restaurant_id": id })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Already bookmarked");

    let account = server.store.find_user_by_email("sam@example.com").await?.unwrap();
    let stored = server.store.find_bookmarks(account.id).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "sam@example.com");

    let (status, list) = server.get("/bookmarks", Some(&user)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&list), vec!["Dishoom"]);
    Ok(())
}

#[tokio::test]
async fn bookmarks_are_per_user() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token().await?;
    let id = server
        .add_restaurant(&admin, restaurant("Dishoom", "Indian", "London", &[]))
        .await?;
    let sam = server.user_token("sam@example.com", "Sam", "Lee").await?;
    let kim = server.user_token("kim@example.com", "Kim", "Park").await?;

    server.post("/bookmarks", Some(&sam), json!({ "restaurant_id": id })).await?;

    let (_, list) = server.get("/bookmarks", Some(&kim)).await?;
    assert_eq!(list, json!([]));

    let (status, _) = server.delete(&format!("/bookmarks/{}", id), Some(&kim)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = server.get("/bookmarks", Some(&sam)).await?;
    assert_eq!(names(&list), vec!["Dishoom"]);
    Ok(())
}

#[tokio::test]
async fn deleting_a_bookmark() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token().await?;
    let id = server
        .add_restaurant(&admin, restaurant("Dishoom", "Indian", "London", &[]))
        .await?;
    let user = server.user_token("sam@example.com", "Sam", "Lee").await?;

    let (status, body) = server.delete(&format!("/bookmarks/{}", id), Some(&user)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Bookmark not found");

    server.post("/bookmarks", Some(&user), json!({ "restaurant_id": id })).await?;

    let (status, body) = server.delete(&format!("/bookmarks/{}", id), Some(&user)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bookmark removed.");

    let (_, list) = server.get("/bookmarks", Some(&user)).await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn bookmarks_of_unknown_restaurants_are_skipped_in_listing() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = server.user_token("sam@example.com", "Sam", "Lee").await?;

    let (status, _) = server
        .post("/bookmarks", Some(&user), json!({ "restaurant_id": Uuid::new_v4().to_string() }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    server
        .post("/bookmarks", Some(&user), json!({ "restaurant_id": "legacy-object-id" }))
        .await?;

    let (status, list) = server.get("/bookmarks", Some(&user)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn bookmark_requires_restaurant_id() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = server.user_token("sam@example.com", "Sam", "Lee").await?;

    for body in [json!({}), json!({ "restaurant_id": "" }), json!({ "restaurant_id": 42 })] {
        let (status, resp) = server.post("/bookmarks", Some(&user), body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["error"], "restaurant_id is required");
    }
    Ok(())
}

#[tokio::test]
async fn bookmarks_require_login() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, _) = server.get("/bookmarks", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server.post("/bookmarks", None, json!({ "restaurant_id": "x" })).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server.delete("/bookmarks/x", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn equivalent_restaurant_ids_share_one_bookmark() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token().await?;
    let id = server
        .add_restaurant(&admin, restaurant("Dishoom", "Indian", "London", &[]))
        .await?;
    let user = server.user_token("sam@example.com", "Sam", "Lee").await?;

    let (status, _) = server
        .post("/bookmarks", Some(&user), json!({ "restaurant_id": id.to_uppercase() }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = server
        .post("/bookmarks", Some(&user), json!({ "restaurant_id": format!(" {} ", id) }))
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = server.get("/bookmarks", Some(&user)).await?;
    assert_eq!(names(&list), vec!["Dishoom"]);

    let (status, _) = server.delete(&format!("/bookmarks/{}", id.to_uppercase()), Some(&user)).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = server.get("/bookmarks", Some(&user)).await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn padded_free_form_ids_are_trimmed() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = server.user_token("sam@example.com", "Sam", "Lee").await?;

    let (status, _) = server.post("/bookmarks", Some(&user), json!({ "restaurant_id": " abc " })).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = server.post("/bookmarks", Some(&user), json!({ "restaurant_id": "abc" })).await?;
    assert_eq!(status, StatusCode::OK);

    let account = server.store.find_user_by_email("sam@example.com").await?.unwrap();
    let stored = server.store.find_bookmarks(account.id).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].restaurant_id, "abc");
    Ok(())
}
