use anyhow::{Context, Result, bail};
use points_core::ElementIds;
use serde::Deserialize;
use std::time::{Duration, Instant};
use thirtyfour::prelude::*;

/// What the message area currently shows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageState {
    pub text: String,
    pub color: String,
    pub display: String,
}

impl MessageState {
    pub fn is_shown(&self) -> bool {
        self.display != "none" && !self.text.is_empty()
    }
}

/// Drives the points modal on a host page through WebDriver.
#[derive(Debug, Clone)]
pub struct ModalPage<'a> {
    driver: &'a WebDriver,
    ids: ElementIds,
}

impl<'a> ModalPage<'a> {
    pub fn new(driver: &'a WebDriver) -> Self {
        Self {
            driver,
            ids: ElementIds::default(),
        }
    }

    pub async fn load(&self, url: &str) -> Result<()> {
        self.driver
            .goto(url)
            .await
            .with_context(|| format!("navigating to {url}"))?;
        Ok(())
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute(
                "return typeof window.openPointsModal === 'function' \
                 && !!document.getElementById(arguments[0])",
                vec![self.ids.container.clone().into()],
            )
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("openPointsModal or the modal markup is missing from the page");
        }
        Ok(())
    }

    pub async fn open(&self, game_id: &str, player_id: i64, points: i64, name: &str) -> Result<()> {
        self.driver
            .execute(
                "window.openPointsModal(arguments[0], arguments[1], arguments[2], arguments[3])",
                vec![game_id.into(), player_id.into(), points.into(), name.into()],
            )
            .await
            .context("calling openPointsModal")?;
        Ok(())
    }

    pub async fn is_visible(&self) -> Result<bool> {
        let container = self.driver.find(By::Id(&self.ids.container)).await?;
        let classes = container.class_name().await?.unwrap_or_default();
        Ok(classes.split_whitespace().any(|c| c == "show"))
    }

    pub async fn points_value(&self) -> Result<String> {
        let input = self.driver.find(By::Id(&self.ids.points_input)).await?;
        Ok(input.value().await?.unwrap_or_default())
    }

    pub async fn player_name(&self) -> Result<String> {
        let label = self.driver.find(By::Id(&self.ids.player_name)).await?;
        Ok(label.text().await?)
    }

    pub async fn set_points(&self, text: &str) -> Result<()> {
        let input = self.driver.find(By::Id(&self.ids.points_input)).await?;
        input.clear().await?;
        if !text.is_empty() {
            input.send_keys(text).await?;
        }
        Ok(())
    }

    pub async fn click_save(&self) -> Result<()> {
        self.driver
            .find(By::Id(&self.ids.save_button))
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn click_close(&self) -> Result<()> {
        self.driver
            .find(By::Id(&self.ids.close_button))
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn message(&self) -> Result<MessageState> {
        let result = self
            .driver
            .execute(
                "const el = document.getElementById(arguments[0]); \
                 if (!el) { return null; } \
                 return { text: el.textContent || '', color: el.style.color || '', \
                          display: el.style.display || '' };",
                vec![self.ids.message.clone().into()],
            )
            .await?;
        let value = result.json().clone();
        if value.is_null() {
            bail!("message area #{} not found", self.ids.message);
        }
        serde_json::from_value(value).context("parsing message state")
    }

    /// Poll until the message area shows something or `timeout` passes.
    pub async fn wait_for_message(&self, timeout: Duration) -> Result<MessageState> {
        let deadline = Instant::now() + timeout;
        loop {
            let state = self.message().await?;
            if state.is_shown() {
                return Ok(state);
            }
            if Instant::now() >= deadline {
                bail!("no feedback message within {timeout:?}");
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    /// Replace the modal markup with a fresh copy, as a partial refresh
    /// would, and fire the swap event.
    pub async fn swap_markup(&self) -> Result<()> {
        self.driver
            .execute(
                "const el = document.getElementById(arguments[0]); \
                 el.outerHTML = el.outerHTML; \
                 document.body.dispatchEvent(new CustomEvent('htmx:afterSwap', { bubbles: true }));",
                vec![self.ids.container.clone().into()],
            )
            .await
            .context("swapping modal markup")?;
        Ok(())
    }
}
