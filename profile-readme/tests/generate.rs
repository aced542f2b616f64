use std::path::PathBuf;

use mockito::{Matcher, Server, ServerGuard};
use profile_readme::{
    install_crypto_provider, AppConfig, ErrorKind, GenerateError, GitHubConfig, LlmConfig,
    LlmError, ReadmeGenerator,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn generator(server: &ServerGuard, api_key: Option<&str>) -> ReadmeGenerator {
    install_crypto_provider();

    let mut llm = LlmConfig::default().with_base_url(format!("{}/v1", server.url()));
    if let Some(key) = api_key {
        llm = llm.with_api_key(key);
    }
    let config = AppConfig {
        github: GitHubConfig::default().with_base_uri(server.url()),
        llm,
    };
    ReadmeGenerator::new(&config).unwrap()
}

async fn mock_github(server: &mut ServerGuard) -> (mockito::Mock, mockito::Mock) {
    let user = server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixture("github/user.json"))
        .create_async()
        .await;
    let repos = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sort".into(), "updated".into()),
            Matcher::UrlEncoded("per_page".into(), "30".into()),
            Matcher::UrlEncoded("type".into(), "all".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixture("github/repos.json"))
        .create_async()
        .await;
    (user, repos)
}

#[tokio::test]
async fn generates_sanitized_readme_for_sparse_profile() {
    let mut server = Server::new_async().await;
    let (user, repos) = mock_github(&mut server).await;
    let completion = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("Full Name: Not provided".to_string()),
            Matcher::Regex(r"\[Python\]".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixture("completions/readme.json"))
        .create_async()
        .await;

    let readme = generator(&server, Some("test-key"))
        .generate("https://github.com/octocat/")
        .await
        .unwrap();

    assert!(readme.contains("Python-3776AB"));
    assert!(readme.contains("#### Data Science\n- Pandas\n![Python]"));
    assert!(readme.contains("# Hi, I'm Octocat"));
    assert!(!readme.contains("<div"));
    assert!(!readme.contains("Typing SVG"));
    assert!(!readme.contains("GitHub Stats"));
    assert!(!readme.contains("\n\n\n"));

    user.assert_async().await;
    repos.assert_async().await;
    completion.assert_async().await;
}

#[tokio::test]
async fn bare_username_is_accepted() {
    let mut server = Server::new_async().await;
    let _github = mock_github(&mut server).await;
    let _completion = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(fixture("completions/readme.json"))
        .create_async()
        .await;

    let readme = generator(&server, Some("test-key"))
        .generate("  octocat ")
        .await
        .unwrap();

    assert!(readme.contains("Python-3776AB"));
}

#[tokio::test]
async fn empty_completion_is_a_generation_error() {
    let mut server = Server::new_async().await;
    let _github = mock_github(&mut server).await;
    let _completion = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(fixture("completions/empty.json"))
        .create_async()
        .await;

    let error = generator(&server, Some("test-key"))
        .generate("octocat")
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Generation);
    assert_eq!(error.to_string(), "Failed to generate README");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let mut server = Server::new_async().await;
    let _user = server
        .mock("GET", "/users/ghost-user-404")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Not Found", "documentation_url": "https://docs.github.com/rest"}"#)
        .create_async()
        .await;
    let completion = server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let error = generator(&server, Some("test-key"))
        .generate("github.com/ghost-user-404")
        .await
        .unwrap_err();

    assert!(matches!(error, GenerateError::Profile(_)));
    assert_eq!(error.kind(), ErrorKind::NotFound);
    completion.assert_async().await;
}

#[tokio::test]
async fn missing_api_key_fails_before_any_request() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let generator = generator(&server, None);
    assert!(!generator.has_api_key());

    let error = generator.generate("octocat").await.unwrap_err();

    assert!(matches!(error, GenerateError::Llm(LlmError::MissingApiKey)));
    assert_eq!(error.kind(), ErrorKind::Configuration);
    any.assert_async().await;
}

#[tokio::test]
async fn invalid_input_is_a_validation_error() {
    let server = Server::new_async().await;
    let generator = generator(&server, Some("test-key"));

    for input in ["", "   ", "https://github.com/octocat/hello-world/tree", "octo cat"] {
        let error = generator.generate(input).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation, "input {input:?}");
    }
}
