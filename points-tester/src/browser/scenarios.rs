use anyhow::{Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::page::ModalPage;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub game_id: String,
    pub player_id: i64,
    pub page: ModalPage<'a>,
    pub verbose: bool,
}

#[async_trait::async_trait]
pub trait BrowserScenario: Sync {
    fn key(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

async fn load_and_open(ctx: &ScenarioCtx<'_>, points: i64) -> Result<()> {
    ctx.page.load(&ctx.base_url).await?;
    ctx.page.ensure_available().await?;
    ctx.page
        .open(&ctx.game_id, ctx.player_id, points, "Test Player")
        .await?;
    ensure!(ctx.page.is_visible().await?, "modal did not open");
    Ok(())
}

pub struct OpenClose;

#[async_trait::async_trait]
impl BrowserScenario for OpenClose {
    fn key(&self) -> &'static str {
        "open-close"
    }

    fn description(&self) -> &'static str {
        "Opening fills the form and the close button hides it"
    }

    async fn run_browser(&self, _driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        load_and_open(ctx, 42).await?;
        let value = ctx.page.points_value().await?;
        ensure!(value == "42", "points input shows {value:?}");
        let name = ctx.page.player_name().await?;
        ensure!(name == "Test Player", "player name shows {name:?}");
        if ctx.verbose {
            println!("  🪟 Modal opened with prefilled score");
        }
        ctx.page.click_close().await?;
        ensure!(!ctx.page.is_visible().await?, "close button left the modal open");
        Ok(())
    }
}

pub struct RebindAfterSwap;

#[async_trait::async_trait]
impl BrowserScenario for RebindAfterSwap {
    fn key(&self) -> &'static str {
        "rebind-after-swap"
    }

    fn description(&self) -> &'static str {
        "Buttons keep working after the modal markup is replaced"
    }

    async fn run_browser(&self, _driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.page.load(&ctx.base_url).await?;
        ctx.page.ensure_available().await?;
        ctx.page.swap_markup().await?;
        if ctx.verbose {
            println!("  🔁 Markup swapped, afterSwap dispatched");
        }
        ctx.page
            .open(&ctx.game_id, ctx.player_id, 5, "Test Player")
            .await?;
        ensure!(ctx.page.is_visible().await?, "modal did not open after swap");
        ctx.page.click_close().await?;
        ensure!(
            !ctx.page.is_visible().await?,
            "close button is unbound after swap"
        );
        Ok(())
    }
}

pub struct SubmitFeedback;

#[async_trait::async_trait]
impl BrowserScenario for SubmitFeedback {
    fn key(&self) -> &'static str {
        "submit-feedback"
    }

    fn description(&self) -> &'static str {
        "Saving shows the server verdict in the message area"
    }

    async fn run_browser(&self, _driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        load_and_open(ctx, 10).await?;
        ctx.page.set_points("15").await?;
        ctx.page.click_save().await?;
        let msg = ctx.page.wait_for_message(Duration::from_secs(10)).await?;
        if ctx.verbose {
            println!("  💬 Feedback: {} ({})", msg.text, msg.color);
        }
        ensure!(
            msg.text.starts_with("Points updated!") || msg.text.starts_with("Failed."),
            "unexpected feedback {:?}",
            msg.text
        );
        let expected = if msg.text.starts_with("Failed.") {
            "red"
        } else {
            "green"
        };
        ensure!(
            msg.color == expected,
            "feedback {:?} is {}, expected {expected}",
            msg.text,
            msg.color
        );
        Ok(())
    }
}

pub struct InvalidInput;

#[async_trait::async_trait]
impl BrowserScenario for InvalidInput {
    fn key(&self) -> &'static str {
        "invalid-input"
    }

    fn description(&self) -> &'static str {
        "Non-numeric points are rejected in the page"
    }

    async fn run_browser(&self, _driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        load_and_open(ctx, 10).await?;
        ctx.page.set_points("abc").await?;
        ctx.page.click_save().await?;
        let msg = ctx.page.wait_for_message(Duration::from_secs(3)).await?;
        ensure!(
            msg.text.starts_with("Invalid input."),
            "unexpected feedback {:?}",
            msg.text
        );
        ensure!(msg.color == "red", "validation message is {}", msg.color);
        ensure!(ctx.page.is_visible().await?, "modal closed on invalid input");
        Ok(())
    }
}

pub static BROWSER_SCENARIOS: &[&dyn BrowserScenario] =
    &[&OpenClose, &RebindAfterSwap, &SubmitFeedback, &InvalidInput];

pub fn find_browser_scenario(key: &str) -> Option<&'static dyn BrowserScenario> {
    BROWSER_SCENARIOS.iter().copied().find(|s| s.key() == key)
}
