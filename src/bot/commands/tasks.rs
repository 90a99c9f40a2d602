//! Home-buying checklist commands - `tasks`, `generate_tasks` and `complete_task`.

use crate::models::{Priority, Task};

/// Emphasis marker per priority; display only.
#[must_use]
pub const fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
    }
}

/// Renders a task list, one line per task.
#[must_use]
pub fn render_tasks(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|task| {
            let mut line = format!(
                "{} **{}** [{}] - {} priority",
                priority_marker(task.priority),
                task.title,
                task.category,
                task.priority
            );
            if !task.due_date.is_empty() {
                line.push_str(&format!(" • due {}", task.due_date));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves what the user typed (a task id or title) to a task id.
#[must_use]
pub fn resolve_task_id<'a>(tasks: &'a [Task], input: &str) -> Option<&'a str> {
    let input = input.trim();
    tasks
        .iter()
        .find(|t| t.id == input)
        .or_else(|| tasks.iter().find(|t| t.title.eq_ignore_ascii_case(input)))
        .map(|t| t.id.as_str())
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{render_tasks, resolve_task_id};
    use crate::{
        bot::{BotData, auth_for, handlers::autocomplete},
        core::{HouseContext, TaskLifecycleManager},
        errors::{Error, Result},
    };
    use std::sync::Arc;

    /// Shows your current home-buying tasks.
    #[poise::command(slash_command, prefix_command)]
    pub async fn tasks(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let mut manager =
            TaskLifecycleManager::new(Arc::clone(&ctx.data().services.tasks), auth_for(ctx.author()));

        let tasks = manager.load_tasks().await?;
        if tasks.is_empty() {
            ctx.say("You have no tasks. Use `/generate_tasks` to build a checklist.")
                .await?;
            return Ok(());
        }

        ctx.say(format!("📋 **Your tasks**\n{}", render_tasks(tasks)))
            .await?;
        Ok(())
    }

    /// Builds a new checklist from your situation, replacing the current one.
    #[poise::command(slash_command, prefix_command)]
    pub async fn generate_tasks(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your credit score"] credit_score: String,
        #[description = "Refinancing details, if any"] refinancing: Option<String>,
        #[description = "Title of the house you are buying"] house_title: Option<String>,
        #[description = "Price of the house you are buying"] house_price: Option<f64>,
    ) -> Result<()> {
        ctx.defer().await?;
        let mut manager =
            TaskLifecycleManager::new(Arc::clone(&ctx.data().services.tasks), auth_for(ctx.author()));

        let house = (house_title.is_some() || house_price.is_some()).then(|| HouseContext {
            title: house_title,
            price: house_price,
        });
        let tasks = manager
            .generate_tasks(
                &credit_score,
                refinancing.as_deref().unwrap_or_default(),
                house.as_ref(),
            )
            .await?;

        if tasks.is_empty() {
            ctx.say("✅ No tasks were generated for your situation.")
                .await?;
            return Ok(());
        }

        ctx.say(format!(
            "📋 **Generated {} tasks**\n{}",
            tasks.len(),
            render_tasks(tasks)
        ))
        .await?;
        Ok(())
    }

    /// Marks a task as done, removing it from your checklist.
    #[poise::command(slash_command, prefix_command)]
    pub async fn complete_task(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Task to complete"]
        #[autocomplete = "autocomplete::autocomplete_task"]
        task: String,
    ) -> Result<()> {
        let mut manager =
            TaskLifecycleManager::new(Arc::clone(&ctx.data().services.tasks), auth_for(ctx.author()));
        manager.load_tasks().await?;

        let Some(task_id) = resolve_task_id(manager.tasks(), &task).map(str::to_string) else {
            ctx.say(format!(
                "❌ Task '{task}' not found. Use `/tasks` to see your checklist."
            ))
            .await?;
            return Ok(());
        };
        let title = manager
            .find(&task_id)
            .map_or_else(|| task.clone(), |t| t.title.clone());

        manager.complete_task(&task_id).await?;
        ctx.say(format!(
            "✅ Completed **{title}**. {} tasks left.",
            manager.tasks().len()
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
