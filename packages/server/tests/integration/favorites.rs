use serde_json::json;

use crate::common::{TestApp, routes, sample_film};

mod toggle {
    use super::*;

    #[tokio::test]
    async fn toggling_twice_ends_where_it_started() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let on = app
            .post_with_token(routes::FAVORITES_TOGGLE, &json!({"film_id": film_id}), &token)
            .await;
        assert_eq!(on.status, 200);
        assert_eq!(on.body["isFavorite"], true);

        let off = app
            .post_with_token(routes::FAVORITES_TOGGLE, &json!({"film_id": film_id}), &token)
            .await;
        assert_eq!(off.status, 200);
        assert_eq!(off.body["isFavorite"], false);

        let list = app.get_with_token(routes::FAVORITES, &token).await;
        assert_eq!(list.body["favorites"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn concurrent_identical_toggles_never_leave_two_rows() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let body = json!({"film_id": film_id});
        let (first, second) = tokio::join!(
            app.post_with_token(routes::FAVORITES_TOGGLE, &body, &token),
            app.post_with_token(routes::FAVORITES_TOGGLE, &body, &token),
        );

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 200);

        // Depending on interleaving the film may end favorited or not,
        // but the composite key caps the row count at one.
        let list = app.get_with_token(routes::FAVORITES, &token).await;
        assert!(list.body["favorites"].as_array().unwrap().len() <= 1);
    }

    #[tokio::test]
    async fn favoriting_an_unknown_film_is_404() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;

        let res = app
            .post_with_token(routes::FAVORITES_TOGGLE, &json!({"film_id": 9999}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn anonymous_callers_cannot_toggle() {
        let app = TestApp::spawn().await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let res = app
            .post_without_token(routes::FAVORITES_TOGGLE, &json!({"film_id": film_id}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod check {
    use super::*;

    #[tokio::test]
    async fn check_reflects_the_current_state() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let before = app
            .get_with_token(&routes::favorites_check(film_id), &token)
            .await;
        assert_eq!(before.body["isFavorite"], false);

        app.post_with_token(routes::FAVORITES_TOGGLE, &json!({"film_id": film_id}), &token)
            .await;

        let after = app
            .get_with_token(&routes::favorites_check(film_id), &token)
            .await;
        assert_eq!(after.body["isFavorite"], true);
    }

    #[tokio::test]
    async fn anonymous_check_answers_false_instead_of_erroring() {
        let app = TestApp::spawn().await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        let res = app.get_without_token(&routes::favorites_check(film_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["isFavorite"], false);
    }

    #[tokio::test]
    async fn favorites_are_private_to_each_user() {
        let app = TestApp::spawn().await;
        let chihiro = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let sophie = app
            .create_authenticated_user("Sophie", "sophie@example.com")
            .await;
        let film_id = app.import_film(&sample_film("g-1", "Spirited Away", "2001")).await;

        app.post_with_token(routes::FAVORITES_TOGGLE, &json!({"film_id": film_id}), &chihiro)
            .await;

        let res = app
            .get_with_token(&routes::favorites_check(film_id), &sophie)
            .await;
        assert_eq!(res.body["isFavorite"], false);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn favorites_are_listed_newest_first_with_film_summaries() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;
        let first = app.import_film(&sample_film("g-1", "Castle in the Sky", "1986")).await;
        let second = app.import_film(&sample_film("g-2", "Spirited Away", "2001")).await;

        app.post_with_token(routes::FAVORITES_TOGGLE, &json!({"film_id": first}), &token)
            .await;
        app.post_with_token(routes::FAVORITES_TOGGLE, &json!({"film_id": second}), &token)
            .await;

        let res = app.get_with_token(routes::FAVORITES, &token).await;

        assert_eq!(res.status, 200);
        let favorites = res.body["favorites"].as_array().unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0]["film"]["title"], "Spirited Away");
        assert_eq!(favorites[1]["film"]["title"], "Castle in the Sky");
        assert_eq!(favorites[0]["film"]["director"], "Hayao Miyazaki");
    }

    #[tokio::test]
    async fn listing_requires_authentication() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::FAVORITES).await;

        assert_eq!(res.status, 401);
    }
}
