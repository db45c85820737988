use serde_json::json;

use crate::common::{TestApp, routes, sample_film};

#[tokio::test]
async fn directors_are_grouped_and_sorted_by_film_count() {
    let app = TestApp::spawn().await;

    let mut takahata = sample_film("g-1", "Grave of the Fireflies", "1988");
    takahata["director"] = json!("Isao Takahata");
    app.import_film(&takahata).await;

    app.import_film(&sample_film("g-2", "Spirited Away", "2001"))
        .await;
    app.import_film(&sample_film("g-3", "Princess Mononoke", "1997"))
        .await;

    let res = app.get_without_token(routes::DIRECTORS).await;

    assert_eq!(res.status, 200);
    let directors = res.body.as_array().unwrap();
    assert_eq!(directors.len(), 2);

    assert_eq!(directors[0]["name"], "Hayao Miyazaki");
    assert_eq!(directors[0]["films_count"], 2);
    assert_eq!(directors[1]["name"], "Isao Takahata");
    assert_eq!(directors[1]["films_count"], 1);
}

#[tokio::test]
async fn known_directors_carry_japanese_name_bio_and_portrait() {
    let app = TestApp::spawn().await;
    app.import_film(&sample_film("g-1", "Spirited Away", "2001"))
        .await;

    let res = app.get_without_token(routes::DIRECTORS).await;

    let miyazaki = &res.body[0];
    assert_eq!(miyazaki["japanese"], "宮崎駿");
    assert_eq!(miyazaki["image"], "/images/directors/hayao-miyazaki.jpg");
    assert!(!miyazaki["bio"].as_str().unwrap().is_empty());
    assert_eq!(miyazaki["films"][0]["title"], "Spirited Away");
}

#[tokio::test]
async fn unknown_director_gets_fallback_bio_and_slugged_portrait() {
    let app = TestApp::spawn().await;

    let mut film = sample_film("g-1", "Tales from Earthsea", "2006");
    film["director"] = json!("Gorō Miyazaki");
    app.import_film(&film).await;

    let res = app.get_without_token(routes::DIRECTORS).await;

    let goro = &res.body[0];
    assert_eq!(goro["name"], "Gorō Miyazaki");
    assert_eq!(goro["image"], "/images/directors/goro-miyazaki.jpg");
    assert!(!goro["bio"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn empty_catalog_yields_empty_directors() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::DIRECTORS).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 0);
}
