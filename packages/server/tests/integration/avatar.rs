use crate::common::{TestApp, routes};

/// Smallest well-formed PNG header; the handler only checks the declared
/// content type, not the pixels.
fn tiny_png() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn uploaded_avatar_appears_on_the_profile() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;

        let res = app
            .upload_with_token(
                routes::AVATAR_UPLOAD,
                "avatar.png",
                tiny_png(),
                "image/png",
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "upload failed: {}", res.text);
        let url = res.body["url"].as_str().unwrap();
        assert!(url.starts_with("/api/v1/avatars/"));
        assert!(url.ends_with(".png"));

        let me = app.get_with_token(routes::ME, &token).await;
        assert_eq!(me.body["image"], url);
    }

    #[tokio::test]
    async fn non_image_content_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;

        let res = app
            .upload_with_token(
                routes::AVATAR_UPLOAD,
                "notes.txt",
                b"just text".to_vec(),
                "text/plain",
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn oversized_image_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;

        let res = app
            .upload_with_token(
                routes::AVATAR_UPLOAD,
                "big.png",
                vec![0u8; 4 * 1024 * 1024 + 1],
                "image/png",
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn anonymous_upload_is_rejected() {
        let app = TestApp::spawn().await;

        let part = reqwest::multipart::Part::bytes(tiny_png())
            .file_name("avatar.png")
            .mime_str("image/png")
            .unwrap();
        let form = reqwest::multipart::Form::new().part("file", part);

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::AVATAR_UPLOAD))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send upload");

        assert_eq!(res.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn replacing_an_avatar_serves_the_new_one() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;

        let first = app
            .upload_with_token(
                routes::AVATAR_UPLOAD,
                "avatar.png",
                tiny_png(),
                "image/png",
                &token,
            )
            .await;
        let first_url = first.body["url"].as_str().unwrap().to_string();

        let second = app
            .upload_with_token(
                routes::AVATAR_UPLOAD,
                "avatar.png",
                b"completely different bytes".to_vec(),
                "image/png",
                &token,
            )
            .await;
        let second_url = second.body["url"].as_str().unwrap().to_string();

        assert_ne!(first_url, second_url);

        let me = app.get_with_token(routes::ME, &token).await;
        assert_eq!(me.body["image"], second_url);

        // The replaced object is gone from the store.
        let old = app.get_without_token(&first_url).await;
        assert_eq!(old.status, 404);
    }
}

mod serving {
    use super::*;

    #[tokio::test]
    async fn avatar_bytes_round_trip_with_etag() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("Chihiro", "chihiro@example.com")
            .await;

        let uploaded = app
            .upload_with_token(
                routes::AVATAR_UPLOAD,
                "avatar.png",
                tiny_png(),
                "image/png",
                &token,
            )
            .await;
        let url = uploaded.body["url"].as_str().unwrap();

        let res = app
            .client
            .get(format!("http://{}{}", app.addr, url))
            .send()
            .await
            .expect("Failed to fetch avatar");

        assert_eq!(res.status().as_u16(), 200);
        assert_eq!(
            res.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("image/png")
        );
        let etag = res
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .expect("avatar response carries an ETag")
            .to_string();
        let bytes = res.bytes().await.unwrap();
        assert_eq!(bytes.to_vec(), tiny_png());

        let cached = app
            .client
            .get(format!("http://{}{}", app.addr, url))
            .header("If-None-Match", &etag)
            .send()
            .await
            .expect("Failed to revalidate avatar");
        assert_eq!(cached.status().as_u16(), 304);
    }

    #[tokio::test]
    async fn unknown_avatar_is_404() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&format!("/api/v1/avatars/{}.png", "0".repeat(64)))
            .await;
        assert_eq!(res.status, 404);

        let malformed = app.get_without_token("/api/v1/avatars/nonsense").await;
        assert_eq!(malformed.status, 404);
    }
}
