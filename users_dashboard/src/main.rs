use clap::Parser;
use dotenv::dotenv;
use futures::future::join_all;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use users_dashboard::api::HttpUsersApi;
use users_dashboard::command::{Command, ParseCommandError, HELP};
use users_dashboard::config::Args;
use users_dashboard::controller::{ControllerError, UserListController};
use users_dashboard::notify::NotificationBus;
use users_dashboard::state::OpStatus;
use users_dashboard::{render, utils};

type Controller = UserListController<HttpUsersApi>;

/// Runs a remote operation in the background so the prompt stays usable.
fn spawn_op<F>(tasks: &mut Vec<JoinHandle<()>>, op: F)
where
    F: Future<Output = Result<OpStatus, ControllerError>> + Send + 'static,
{
    tasks.push(tokio::spawn(async move {
        if let Err(e) = op.await {
            println!("{}", e);
        }
    }));
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

async fn handle(command: Command, controller: &Arc<Controller>, tasks: &mut Vec<JoinHandle<()>>) {
    match command {
        Command::List => print!("{}", render::render_table(&controller.users().await)),
        Command::Form => print!("{}", render::render_form(&controller.draft().await)),
        Command::Set { field, value } => controller.set_field(field, value).await,
        Command::Edit(id) => match controller.find(id).await {
            Some(record) => {
                controller.edit(&record).await;
                print!("{}", render::render_form(&controller.draft().await));
            }
            None => println!("no user with id {}", id),
        },
        Command::Delete(id) => {
            let controller = controller.clone();
            spawn_op(tasks, async move { controller.delete(id).await });
        }
        Command::Submit => {
            let missing = controller.draft().await.missing_fields();
            if missing.is_empty() {
                let controller = controller.clone();
                spawn_op(tasks, async move { controller.submit().await });
            } else {
                let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
                println!("please fill in: {}", names.join(", "));
            }
        }
        Command::Pending => print!("{}", render::render_pending(&controller.pending().await)),
        Command::Export(path) => {
            if let Err(e) = utils::save_json(&controller.users().await, &path) {
                println!("export failed: {}", e);
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    let api = HttpUsersApi::new(args.api_url.clone(), args.timeout())?;
    log::info!("users service: {}", api.base_url());

    let controller = Arc::new(UserListController::new(
        api,
        NotificationBus::new(args.notification_capacity),
    ));

    let mut notifications = controller.notifications().subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(event) if event.notification.is_error() => {
                    eprintln!("\n! {}", event.notification)
                }
                Ok(event) => println!("\n* {}", event.notification),
                Err(RecvError::Lagged(missed)) => {
                    log::warn!("{} notifications were dropped", missed)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut tasks = Vec::new();
    {
        let controller = controller.clone();
        spawn_op(&mut tasks, async move { controller.mount().await });
    }

    println!("{}", HELP);
    prompt();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        tasks.retain(|task| !task.is_finished());
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => handle(command, &controller, &mut tasks).await,
            Err(ParseCommandError::Empty) => {}
            Err(e) => println!("{}", e),
        }
        prompt();
    }

    if !tasks.is_empty() {
        log::info!("waiting for {} requests in flight", tasks.len());
    }
    for result in join_all(tasks).await {
        if let Err(e) = result {
            log::error!("operation task failed: {}", e);
        }
    }

    // Dropping the last controller closes the channel once queued notifications are printed.
    drop(controller);
    printer.await?;
    Ok(())
}
