// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod get;
mod post;
pub mod server;
mod state;
mod view;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use reqwest::StatusCode;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::error::Fallible;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::serve::server::start_server;

    async fn wait_for_server(port: u16) {
        loop {
            if let Ok(stream) = TcpStream::connect(format!("0.0.0.0:{port}")).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> Fallible<()> {
        let directory = PathBuf::from("./derpherp");
        let result = start_server(directory, 8123).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_start_server_without_questions() -> Fallible<()> {
        let directory = tempfile::tempdir()?;
        let result = start_server(directory.path().to_path_buf(), 8124).await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let (_guard, directory) = create_tmp_copy_of_test_directory()?;
        let port = portpicker::pick_unused_port().unwrap();
        spawn(async move { start_server(directory, port).await });
        wait_for_server(port).await;
        let base = format!("http://0.0.0.0:{port}");

        // The stylesheet endpoint.
        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // An unknown endpoint.
        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The root endpoint shows a question with a disabled submit button.
        let response = reqwest::get(format!("{base}/")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await?;
        assert!(html.contains("class=\"choice\""));
        assert!(html.contains("disabled"));

        // Select the first choice.
        let response = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("action", "Select"), ("choice", "0")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("selected"));
        assert!(!html.contains("disabled"));

        // Submit the answer.
        let response = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("action", "Submit")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Question Completed!"));
        assert!(html.contains("Explanation:"));
        assert!(html.contains("Current Streak: <strong>1</strong> days"));
        assert!(html.contains("Come back tomorrow for a new challenge!"));
        // The answered day is marked on the calendar.
        assert!(html.contains("🔥"));

        // Submitting again is rejected; the day stays completed.
        let response = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(&[("action", "Select"), ("choice", "1")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Question Completed!"));

        Ok(())
    }

    #[tokio::test]
    async fn test_calendar_navigation() -> Fallible<()> {
        let (_guard, directory) = create_tmp_copy_of_test_directory()?;
        let port = portpicker::pick_unused_port().unwrap();
        spawn(async move { start_server(directory, port).await });
        wait_for_server(port).await;
        let base = format!("http://0.0.0.0:{port}");

        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        let title = extract_month_title(&html);

        // Navigate forward, then back; the title must change and return.
        let client = reqwest::Client::new();
        let html = client
            .post(format!("{base}/"))
            .form(&[("action", "NextMonth")])
            .send()
            .await?
            .text()
            .await?;
        let next_title = extract_month_title(&html);
        assert_ne!(title, next_title);

        let html = client
            .post(format!("{base}/"))
            .form(&[("action", "PrevMonth")])
            .send()
            .await?
            .text()
            .await?;
        assert_eq!(extract_month_title(&html), title);
        Ok(())
    }

    fn extract_month_title(html: &str) -> String {
        let marker = "<span class=\"month\">";
        let start = html.find(marker).unwrap() + marker.len();
        let end = html[start..].find("</span>").unwrap();
        html[start..start + end].to_string()
    }
}
