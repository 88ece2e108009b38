use std::sync::Arc;

use ansi_term::Colour;
use anyhow::Result;
use clap::{Args, Subcommand};

use crate::{
    notify::Notifier,
    tasks::{
        entities::{NewTask, Priority, Status, Task},
        registry::TaskRegistry,
        samples::sample_tasks,
        view::{SortKey, StatusFilter},
    },
    utils::clock::Clock,
};

#[derive(Debug, Clone, Copy, Args)]
pub struct ViewArgs {
    #[arg(
        long,
        short,
        default_value_t = StatusFilter::All,
        help = "Only show tasks with this status: all, pending, in-progress or completed"
    )]
    filter: StatusFilter,
    #[arg(long, short, default_value_t = SortKey::Priority, help = "Order of the list")]
    sort: SortKey,
    #[arg(long, help = "Print the list as JSON")]
    json: bool,
}

/// Every invocation starts from the sample task list, changes are not kept between runs.
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    #[command(about = "List tasks")]
    Tasks {
        #[command(flatten)]
        view: ViewArgs,
    },
    #[command(about = "Create a task and show the resulting list")]
    Add {
        title: String,
        #[arg(long, short, default_value = "")]
        description: String,
        #[arg(long, short, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(long, short, default_value = "", help = "Defaults to General")]
        category: String,
        #[arg(long, short, default_value = "", help = "Free text such as 3h. Defaults to 1h")]
        estimate: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    #[command(about = "Change the status of a task and show the resulting list")]
    SetStatus {
        id: u64,
        status: Status,
        #[command(flatten)]
        view: ViewArgs,
    },
    #[command(about = "Delete a task and show the resulting list")]
    Delete {
        id: u64,
        #[command(flatten)]
        view: ViewArgs,
    },
}

pub fn process_task_command(
    command: TaskCommand,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn Notifier>,
) -> Result<()> {
    let mut registry = TaskRegistry::new(sample_tasks(), clock, notifier);

    let view = match command {
        TaskCommand::Tasks { view } => view,
        TaskCommand::Add {
            title,
            description,
            priority,
            category,
            estimate,
            view,
        } => {
            registry.create_task(NewTask {
                title,
                description,
                priority,
                category,
                estimated_time: estimate,
            })?;
            view
        }
        TaskCommand::SetStatus { id, status, view } => {
            registry.set_status(id, status);
            view
        }
        TaskCommand::Delete { id, view } => {
            registry.delete_task(id);
            view
        }
    };

    print_tasks(&registry.view(view.filter, view.sort), view.json)
}

fn print_tasks(tasks: &[&Task], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        return Ok(());
    }
    for task in tasks {
        println!(
            "{}\t{}\t{}\t{}/{}\t{}\t{}",
            task.id,
            paint_status(task.status),
            paint_priority(task.priority),
            task.actual_time,
            task.estimated_time,
            task.category,
            task.title
        );
    }
    Ok(())
}

pub(super) fn paint_priority(priority: Priority) -> String {
    let colour = match priority {
        Priority::High => Colour::Red,
        Priority::Medium => Colour::Yellow,
        Priority::Low => Colour::Blue,
    };
    colour.paint(priority.to_string()).to_string()
}

pub(super) fn paint_status(status: Status) -> String {
    let colour = match status {
        Status::Completed => Colour::Green,
        Status::InProgress => Colour::Cyan,
        Status::Pending => Colour::White,
    };
    colour.paint(status.to_string()).to_string()
}
