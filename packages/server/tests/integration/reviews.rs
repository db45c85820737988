use serde_json::json;

use crate::common::{TestApp, routes, sample_film};

mod upsert {
    use super::*;

    #[tokio::test]
    async fn first_submission_creates_a_review() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let res = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"film_id": film_id, "rating": 9, "comment": "Wonderful."}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["review"]["rating"], 9);
        assert_eq!(res.body["review"]["comment"], "Wonderful.");
        assert_eq!(res.body["review"]["user"]["name"], "Chihiro");
    }

    #[tokio::test]
    async fn second_submission_replaces_instead_of_duplicating() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let first = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"film_id": film_id, "rating": 6, "comment": "Fine."}),
                &token,
            )
            .await;
        let second = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"film_id": film_id, "rating": 10, "comment": "Changed my mind."}),
                &token,
            )
            .await;

        assert_eq!(second.status, 200);
        assert_eq!(
            first.body["review"]["id"], second.body["review"]["id"],
            "the same row must be updated"
        );

        let list = app
            .get_without_token(&routes::reviews_for(film_id))
            .await;
        assert_eq!(list.body["count"], 1);
        assert_eq!(list.body["reviews"][0]["rating"], 10);
        assert_eq!(list.body["reviews"][0]["comment"], "Changed my mind.");
    }

    #[tokio::test]
    async fn concurrent_identical_submissions_store_one_row() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let body = json!({"film_id": film_id, "rating": 7, "comment": "Twice at once."});
        let (first, second) = tokio::join!(
            app.post_with_token(routes::REVIEWS, &body, &token),
            app.post_with_token(routes::REVIEWS, &body, &token),
        );

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 200);

        let list = app.get_without_token(&routes::reviews_for(film_id)).await;
        assert_eq!(list.body["count"], 1);
        assert_eq!(list.body["reviews"][0]["rating"], 7);
    }

    #[tokio::test]
    async fn different_users_review_independently() {
        let app = TestApp::spawn().await;
        let chihiro = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let sophie = app
            .create_authenticated_user("Sophie", "sophie@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        app.post_with_token(
            routes::REVIEWS,
            &json!({"film_id": film_id, "rating": 8}),
            &chihiro,
        )
        .await;
        app.post_with_token(
            routes::REVIEWS,
            &json!({"film_id": film_id, "rating": 6}),
            &sophie,
        )
        .await;

        let list = app.get_without_token(&routes::reviews_for(film_id)).await;
        assert_eq!(list.body["count"], 2);
    }

    #[tokio::test]
    async fn script_tags_are_stripped_from_comments() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let res = app
            .post_with_token(
                routes::REVIEWS,
                &json!({
                    "film_id": film_id,
                    "rating": 7,
                    "comment": "Great <script>alert('x')</script>film",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        let comment = res.body["review"]["comment"].as_str().unwrap();
        assert!(!comment.contains("<script"));
        assert!(!comment.contains("alert"));
        assert!(comment.contains("Great"));
        assert!(comment.contains("film"));
    }

    #[tokio::test]
    async fn comment_of_only_markup_is_stored_as_null() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let res = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"film_id": film_id, "rating": 7, "comment": "<b></b>  "}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["review"]["comment"].is_null());
    }

    #[tokio::test]
    async fn out_of_range_ratings_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        for rating in [0, 11, -3] {
            let res = app
                .post_with_token(
                    routes::REVIEWS,
                    &json!({"film_id": film_id, "rating": rating}),
                    &token,
                )
                .await;
            assert_eq!(res.status, 400, "rating {rating} must be rejected");
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn fractional_ratings_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let res = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"film_id": film_id, "rating": 3.5}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn overlong_comment_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let res = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"film_id": film_id, "rating": 7, "comment": "x".repeat(501)}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn reviewing_an_unknown_film_is_404() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;

        let res = app
            .post_with_token(routes::REVIEWS, &json!({"film_id": 9999, "rating": 7}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn anonymous_callers_cannot_review() {
        let app = TestApp::spawn().await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::REVIEWS))
            .json(&json!({"film_id": film_id, "rating": 7}))
            .send()
            .await
            .expect("Failed to send POST request");

        assert_eq!(res.status().as_u16(), 401);
    }
}

mod aggregate {
    use super::*;

    #[tokio::test]
    async fn average_is_rounded_to_one_decimal() {
        let app = TestApp::spawn().await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        for (i, rating) in [8, 6, 10].into_iter().enumerate() {
            let token = app
                .create_authenticated_user(
                    &format!("User {i}"),
                    &format!("user{i}@example.com"),
                )
                .await;
            app.post_with_token(
                routes::REVIEWS,
                &json!({"film_id": film_id, "rating": rating}),
                &token,
            )
            .await;
        }

        let res = app.get_without_token(&routes::reviews_for(film_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["average"], 8.0);
        assert_eq!(res.body["count"], 3);
    }

    #[tokio::test]
    async fn film_without_reviews_has_null_average() {
        let app = TestApp::spawn().await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let res = app.get_without_token(&routes::reviews_for(film_id)).await;

        assert_eq!(res.status, 200);
        assert!(res.body["average"].is_null());
        assert_eq!(res.body["count"], 0);
    }

    #[tokio::test]
    async fn unknown_film_yields_the_empty_aggregate() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::reviews_for(9999)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["reviews"], json!([]));
        assert!(res.body["average"].is_null());
        assert_eq!(res.body["count"], 0);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn author_can_delete_their_review() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let created = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"film_id": film_id, "rating": 7}),
                &token,
            )
            .await;
        let review_id = created.body["review"]["id"].as_i64().unwrap() as i32;

        let res = app.delete_with_token(&routes::review(review_id), &token).await;
        assert_eq!(res.status, 204);

        let list = app.get_without_token(&routes::reviews_for(film_id)).await;
        assert_eq!(list.body["count"], 0);
    }

    #[tokio::test]
    async fn deleting_someone_elses_review_is_forbidden() {
        let app = TestApp::spawn().await;
        let author = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let intruder = app
            .create_authenticated_user("Sophie", "sophie@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let created = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"film_id": film_id, "rating": 7}),
                &author,
            )
            .await;
        let review_id = created.body["review"]["id"].as_i64().unwrap() as i32;

        let res = app
            .delete_with_token(&routes::review(review_id), &intruder)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let list = app.get_without_token(&routes::reviews_for(film_id)).await;
        assert_eq!(list.body["count"], 1, "review must survive");
    }

    #[tokio::test]
    async fn deleting_an_unknown_review_is_404() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;

        let res = app.delete_with_token(&routes::review(9999), &token).await;

        assert_eq!(res.status, 404);
    }
}
