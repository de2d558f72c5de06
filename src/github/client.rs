use crate::config::Credentials;
use crate::error::{RepolangError, Result};
use crate::github::host::RepoHost;
use crate::github::types::{LanguageBreakdown, RepoRecord};
use octocrab::Octocrab;
use serde::Serialize;

#[derive(Serialize)]
struct PageParams {
    page: u32,
    per_page: u8,
}

#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
}

impl GitHubClient {
    pub fn new(credentials: &Credentials, base_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(credentials.token.clone());
        if let Some(url) = base_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| RepolangError::Client(format!("invalid api url {url}: {e}")))?;
        }
        let octo = builder
            .build()
            .map_err(|e| RepolangError::Client(e.to_string()))?;

        Ok(Self { octo })
    }
}

impl RepoHost for GitHubClient {
    async fn list_repos_page(&self, page: u32, per_page: u8) -> Result<Vec<RepoRecord>> {
        self.octo
            .get("/user/repos", Some(&PageParams { page, per_page }))
            .await
            .map_err(|e| RepolangError::UpstreamListing {
                page,
                message: describe(e),
            })
    }

    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBreakdown> {
        self.octo
            .get(format!("/repos/{owner}/{repo}/languages"), None::<&()>)
            .await
            .map_err(|e| RepolangError::UpstreamDetail {
                repo: repo.to_string(),
                message: describe(e),
            })
    }
}

fn describe(err: octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            format!("status {}: {}", source.status_code, source.message)
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::listing::try_list_repositories;
    use crate::test_utils::credentials;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers one request per connection with the scripted responses in
    /// order, repeating the last one. Returns the base URL and the request
    /// lines seen.
    async fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();

        tokio::spawn(async move {
            let mut served = 0usize;
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let text = String::from_utf8_lossy(&request);
                log.lock()
                    .unwrap()
                    .push(text.lines().next().unwrap_or_default().to_string());

                let (status, body) = responses[served.min(responses.len() - 1)];
                served += 1;
                let reply = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{addr}"), seen)
    }

    const BOOM: &str = r#"{"message":"boom","documentation_url":"https://docs.github.com/rest"}"#;

    #[tokio::test]
    async fn failed_listing_page_is_an_upstream_listing_error() {
        let (base, seen) = serve(vec![
            ("200 OK", r#"[{"name":"site","fork":false},{"name":"linux","fork":true}]"#),
            ("500 Internal Server Error", BOOM),
        ])
        .await;
        let client = GitHubClient::new(&credentials(), Some(&base)).unwrap();

        let err = try_list_repositories(&client, 100).await.unwrap_err();
        match err {
            RepolangError::UpstreamListing { page, message } => {
                assert_eq!(page, 2);
                assert!(message.contains("boom"), "message was {message}");
            }
            other => panic!("expected listing error, got {other:?}"),
        }

        let seen = seen.lock().unwrap().clone();
        assert!(seen[0].starts_with("GET /user/repos?page=1&per_page=100 "), "{seen:?}");
        assert!(seen[1].starts_with("GET /user/repos?page=2&per_page=100 "), "{seen:?}");
    }

    #[tokio::test]
    async fn listing_page_deserializes_records() {
        let (base, _) = serve(vec![(
            "200 OK",
            r#"[{"id":7,"name":"site","fork":false},{"id":8,"name":"linux","fork":true}]"#,
        )])
        .await;
        let client = GitHubClient::new(&credentials(), Some(&base)).unwrap();

        let page = client.list_repos_page(1, 100).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "site");
        assert!(page[1].fork);
    }

    #[tokio::test]
    async fn languages_come_back_in_reported_order() {
        let (base, seen) = serve(vec![("200 OK", r#"{"Rust":900,"Shell":100}"#)]).await;
        let client = GitHubClient::new(&credentials(), Some(&base)).unwrap();

        let breakdown = client.repo_languages("octo", "tools").await.unwrap();
        assert_eq!(
            breakdown,
            LanguageBreakdown(vec![("Rust".to_string(), 900), ("Shell".to_string(), 100)])
        );
        assert!(seen.lock().unwrap()[0].starts_with("GET /repos/octo/tools/languages "));
    }

    #[tokio::test]
    async fn failed_languages_request_is_an_upstream_detail_error() {
        let (base, _) = serve(vec![("404 Not Found", r#"{"message":"Not Found"}"#)]).await;
        let client = GitHubClient::new(&credentials(), Some(&base)).unwrap();

        let err = client.repo_languages("octo", "gone").await.unwrap_err();
        match err {
            RepolangError::UpstreamDetail { repo, message } => {
                assert_eq!(repo, "gone");
                assert!(message.contains("Not Found"), "message was {message}");
            }
            other => panic!("expected detail error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_base_url_is_a_client_error() {
        let err = GitHubClient::new(&credentials(), Some("not a url")).err();
        assert!(matches!(err, Some(RepolangError::Client(_))));
    }
}
