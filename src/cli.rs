//! Command-line surface. Each subcommand drives one screen controller.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::errors::{ClientError, FieldError};
use crate::export::ExportOutcome;
use crate::filter::{AttendanceCard, RowPresentation, FILTER_ALL, MONTH_SENTINEL, NOT_AVAILABLE};
use crate::models::{LoginRequest, ProfileField, SignUpForm, UserProfile};
use crate::platform::ExportAction;
use crate::screens::{
    AccountScreen, AttendanceScreen, HomeScreen, ListControls, LoginOutcome, LoginScreen,
    LogoutOutcome, ProfileScreen, SignUpOutcome, SignUpScreen, StalePolicy, TodoScreen,
};
use crate::AppState;

#[derive(Parser)]
#[command(name = "presensi")]
#[command(about = "Attendance client for the PKL internship backend")]
pub struct Cli {
    /// Drop list responses that are older than the newest request
    #[arg(long, global = true, default_value_t = false)]
    pub latest_wins: bool,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn stale_policy(&self) -> StalePolicy {
        if self.latest_wins {
            StalePolicy::LatestRequestWins
        } else {
            StalePolicy::LastResolvedWins
        }
    }

    /// Answer preset for the export prompt, if any.
    pub fn export_action(&self) -> Option<ExportAction> {
        match &self.command {
            Command::Export { action } => *action,
            Command::Attendance { download, .. } | Command::Todo { download, .. } => *download,
            _ => None,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register(RegisterArgs),
    /// End the session
    Logout,
    /// Dashboard: clock, today's card and the attendance history
    Home {
        /// Load as a pull-to-refresh instead of a screen focus
        #[arg(long)]
        refresh: bool,
    },
    /// Attendance history
    Attendance {
        #[arg(long, default_value = MONTH_SENTINEL)]
        month: String,
        /// Pick from the filter dropdown; "All" clears the month
        #[arg(long, value_parser = [FILTER_ALL])]
        filter: Option<String>,
        #[arg(long)]
        refresh: bool,
        /// Export the document afterwards and answer the prompt
        #[arg(long)]
        download: Option<ExportAction>,
    },
    /// To-do list
    Todo {
        #[arg(long, default_value = MONTH_SENTINEL)]
        month: String,
        #[arg(long, value_parser = [FILTER_ALL])]
        filter: Option<String>,
        #[arg(long)]
        refresh: bool,
        #[arg(long)]
        download: Option<ExportAction>,
    },
    /// Profile summary
    Profile {
        /// Reload only the profile itself
        #[arg(long)]
        refresh: bool,
    },
    /// Upload a new profile picture
    Avatar { path: PathBuf },
    /// Account details
    Account,
    /// Change one account field
    AccountSet { field: ProfileField, value: String },
    /// Download the attendance document
    Export {
        #[arg(long)]
        action: Option<ExportAction>,
    },
}

#[derive(clap::Args)]
pub struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
    #[arg(long)]
    telp: String,
    #[arg(long)]
    tempat_lahir: String,
    /// e.g. "17 August 2005"
    #[arg(long)]
    tanggal_lahir: String,
    #[arg(long)]
    jenis_kelamin: String,
    #[arg(long)]
    status: String,
    #[arg(long)]
    jurusan: String,
    #[arg(long)]
    sekolah: String,
    #[arg(long)]
    agama: String,
    #[arg(long)]
    alamat: String,
}

impl From<RegisterArgs> for SignUpForm {
    fn from(args: RegisterArgs) -> Self {
        SignUpForm {
            name: args.name,
            email: args.email,
            password: args.password,
            confirm_password: args.confirm_password,
            telp: args.telp,
            tempat_lahir: args.tempat_lahir,
            tanggal_lahir: args.tanggal_lahir,
            jenis_kelamin: args.jenis_kelamin,
            status: args.status,
            jurusan: args.jurusan,
            sekolah: args.sekolah,
            agama: args.agama,
            alamat: args.alamat,
        }
    }
}

/// Run one command. Returns false when it failed; the reason has already been
/// shown as an alert or printed.
pub async fn run(app: AppState, command: Command, policy: StalePolicy) -> bool {
    match command {
        Command::Login { email, password } => {
            let screen = LoginScreen::new(app);
            match screen.submit(LoginRequest { email, password }).await {
                LoginOutcome::LoggedIn => {
                    println!("Logged in");
                    true
                }
                LoginOutcome::Invalid(errors) => print_invalid(errors),
                LoginOutcome::Failed => false,
            }
        }
        Command::Register(args) => {
            let screen = SignUpScreen::new(app);
            match screen.submit(args.into()).await {
                SignUpOutcome::Registered => true,
                SignUpOutcome::Invalid(errors) => print_invalid(errors),
                SignUpOutcome::Rejected(message) | SignUpOutcome::Failed(message) => {
                    tracing::debug!("Registration not completed: {}", message);
                    false
                }
            }
        }
        Command::Logout => {
            let screen = ProfileScreen::new(app);
            match screen.logout().await {
                LogoutOutcome::LoggedOut => {
                    println!("Logged out");
                    true
                }
                LogoutOutcome::Rejected | LogoutOutcome::Failed => false,
            }
        }
        Command::Home { refresh } => {
            let screen = HomeScreen::new(app);
            let fetched = if refresh {
                screen.tick().await;
                screen.refresh().await
            } else {
                screen.on_focus().await
            };
            let state = screen.snapshot().await;
            println!("{}  {}", state.current_time, state.current_date);
            println!("Hi, {}", state.user.name.as_deref().unwrap_or(NOT_AVAILABLE));
            print_card(&state.card);
            if state.today.is_empty() {
                println!("No attendance recorded today");
            }
            print_rows(&screen.rows().await);
            fetched
        }
        Command::Attendance {
            month,
            filter,
            refresh,
            download,
        } => {
            let screen = AttendanceScreen::new(app, policy);
            let fetched = if refresh {
                screen.refresh().await
            } else {
                screen.on_focus().await
            };
            if let Some(choice) = filter {
                screen.toggle_filter_dropdown().await;
                screen.select_filter(&choice).await;
            }
            if month != MONTH_SENTINEL {
                screen.toggle_month_dropdown().await;
                screen.select_month(&month).await;
            }
            let state = screen.snapshot().await;
            print_heading(&state.current_date, &state.controls);
            print_rows(&screen.rows().await);
            let exported = match download {
                Some(_) => report_export(screen.download().await),
                None => true,
            };
            fetched && exported
        }
        Command::Todo {
            month,
            filter,
            refresh,
            download,
        } => {
            let screen = TodoScreen::new(app, policy);
            let fetched = if refresh {
                screen.refresh().await
            } else {
                screen.on_focus().await
            };
            if let Some(choice) = filter {
                screen.toggle_filter_dropdown().await;
                screen.select_filter(&choice).await;
            }
            if month != MONTH_SENTINEL {
                screen.toggle_month_dropdown().await;
                screen.select_month(&month).await;
            }
            let state = screen.snapshot().await;
            print_heading(&state.current_date, &state.controls);
            for todo in &state.filtered {
                println!(
                    "#{:<5} {:<12} {:<10} {} ({})",
                    todo.id, todo.date, todo.status, todo.content, todo.keterangan
                );
                if !todo.pesan.is_empty() {
                    println!("{:<19} > {}", "", todo.pesan);
                }
            }
            println!("Completed: {}/{}", state.completed_count(), state.todos.len());
            let exported = match download {
                Some(_) => report_export(screen.download().await),
                None => true,
            };
            fetched && exported
        }
        Command::Profile { refresh } => {
            let screen = ProfileScreen::new(app);
            let fetched = if refresh {
                screen.refresh().await
            } else {
                screen.on_focus().await
            };
            let state = screen.snapshot().await;
            print_identity(&state.user);
            println!(
                "Avatar: {}",
                state.avatar.as_deref().unwrap_or(NOT_AVAILABLE)
            );
            if !refresh {
                print_card(&state.card);
                println!("Completed to-dos: {}", state.completed_todos);
            }
            fetched
        }
        Command::Avatar { path } => {
            let screen = ProfileScreen::new(app);
            let uploaded = screen.upload_avatar(&path).await;
            if uploaded {
                println!("Profile picture updated");
            }
            uploaded
        }
        Command::Account => {
            let screen = AccountScreen::new(app);
            let loaded = screen.load().await;
            for (label, value) in screen.rows().await {
                println!("{:<14} {}", label, value);
            }
            loaded
        }
        Command::AccountSet { field, value } => {
            let screen = AccountScreen::new(app);
            screen.load().await;
            screen.begin_edit(field).await;
            screen.set_draft(&value).await;
            let saved = screen.commit().await;
            if saved {
                let state = screen.snapshot().await;
                println!("{}: {}", field.label(), state.user.display(field));
            }
            saved
        }
        Command::Export { .. } => {
            let screen = AttendanceScreen::new(app, policy);
            report_export(screen.download().await)
        }
    }
}

fn print_heading(current_date: &str, controls: &ListControls) {
    println!(
        "{}  [{} / {}]",
        current_date, controls.selected_filter, controls.selected_month
    );
}

fn print_identity(user: &UserProfile) {
    println!("{}", user.display(ProfileField::Name));
    println!("{}", user.display(ProfileField::Sekolah));
}

fn print_card(card: &AttendanceCard) {
    println!(
        "Check in:  {:<9} [{} {}]",
        card.in_time,
        card.in_display.icon.as_str(),
        card.in_display.color.as_str()
    );
    println!(
        "Check out: {:<9} [{} {}]",
        card.out_time,
        card.out_display.icon.as_str(),
        card.out_display.color.as_str()
    );
}

fn print_rows(rows: &[RowPresentation]) {
    for row in rows {
        println!(
            "{:<28} {:<10} [{} {}] ({})",
            row.date_label,
            row.label,
            row.display.icon.as_str(),
            row.display.color.as_str(),
            row.label_color.as_str()
        );
    }
}

fn print_invalid(errors: Vec<FieldError>) -> bool {
    println!("{}", ClientError::Validation(errors).message());
    false
}

fn report_export(outcome: ExportOutcome) -> bool {
    match outcome {
        ExportOutcome::Downloaded {
            document,
            action,
            action_error,
        } => {
            println!("Saved {} ({})", document.path.display(), action);
            action_error.is_none()
        }
        ExportOutcome::NoFileData | ExportOutcome::DownloadFailed => false,
    }
}
