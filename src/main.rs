use std::{path::Path, process::ExitCode, sync::Arc};

use newsdesk_admin::{
    cli::{Command, Invocation, USAGE},
    config::Config,
    media::{MediaFile, PreviewRegistry},
    models::{news_post::Post, users::User},
    repositories::ApiRepo,
    routes::{self, Navigation, Route},
    services::{
        ads::AdsService, app_version::AppVersionService, auth::AuthService,
        dashboard::DashboardService, moderation::ModerationService, posts::NewsPostsService,
        upload::UploadService, user::UserService,
    },
    session::Session,
    views::{DashboardView, Notice, PendingView, PostListView, PostSource, UsersView},
    Error, Result,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub session: Session,
    pub auth_service: AuthService,
    pub news_post_service: NewsPostsService,
    pub moderation_service: ModerationService,
    pub dashboard_service: DashboardService,
    pub users_service: UserService,
    pub ads_service: AdsService,
    pub app_version_service: AppVersionService,
    pub upload_service: UploadService,
}

impl AppState {
    fn new(config: &Config) -> Result<Self> {
        let session = Session::from_file(&config.token_path);
        let api = Arc::new(ApiRepo::new(config, session.clone())?);

        Ok(AppState {
            session: session.clone(),
            auth_service: AuthService::new(api.clone(), session),
            news_post_service: NewsPostsService::new(api.clone(), PreviewRegistry::new()),
            moderation_service: ModerationService::new(api.clone()),
            dashboard_service: DashboardService::new(api.clone()),
            users_service: UserService::new(api.clone()),
            ads_service: AdsService::new(api.clone()),
            app_version_service: AppVersionService::new(api.clone()),
            upload_service: UploadService::new(api),
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("newsdesk_admin=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let invocation = match Invocation::parse(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{}\n\n{}", err.user_message(), USAGE);
            return ExitCode::from(2);
        }
    };

    let state = match Config::init().and_then(|config| {
        debug!("Using API at {}", config.api_url);
        AppState::new(&config)
    }) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("🔥 {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(&state, &invocation).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{}", Notice::from(&err));
            if err.requires_login() {
                println!("→ {}", Route::Login);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &AppState, inv: &Invocation) -> Result<()> {
    match routes::guard(inv.route()?, &state.session) {
        Navigation::Allow(route) => debug!("Entering {}", route),
        Navigation::Redirect(Route::Login) if inv.command == Command::Logout => {
            println!("{}", Notice::success("Already logged out"));
            return Ok(());
        }
        Navigation::Redirect(Route::Login) => return Err(Error::NotAuthenticated),
        Navigation::Redirect(target) => {
            info!("Already logged in, redirecting to {}", target);
            return show_dashboard(state).await;
        }
    }

    match inv.command {
        Command::Login => {
            state
                .auth_service
                .login(inv.require("email")?, inv.require("password")?)
                .await?;
            println!("{}", Notice::success("Logged in"));
            println!("→ {}", Route::Dashboard);
        }
        Command::Logout => {
            state.auth_service.logout().await?;
            println!("{}", Notice::success("Logged out"));
        }
        Command::Dashboard => show_dashboard(state).await?,
        Command::Pending => {
            let mut view = pending_view(state);
            print_posts(view.refresh().await?);
        }
        Command::Approve | Command::Reject => {
            let id = inv.require("id")?;
            let mut view = pending_view(state);
            view.refresh().await?;
            let notice = if inv.command == Command::Approve {
                view.approve(id).await?
            } else {
                view.reject(id).await?
            };
            println!("{}", notice);
            print_posts(view.posts());
        }
        Command::Rejected => {
            let mut view =
                PostListView::new(PostSource::Rejected(state.dashboard_service.clone()));
            print_posts(view.refresh().await?);
        }
        Command::Approved => {
            let mut view =
                PostListView::new(PostSource::Approved(state.news_post_service.clone()));
            print_posts(view.refresh().await?);
        }
        Command::Post | Command::VideoPost => {
            let mut form = if inv.command == Command::Post {
                state.news_post_service.standard_form()
            } else {
                state.news_post_service.video_form()
            };
            inv.fill_post_form(&mut form).await?;
            let message = state.news_post_service.create_news_post(&mut form).await?;
            println!("{}", Notice::success(message));
        }
        Command::Edit => {
            let mut form = state
                .news_post_service
                .edit_form(inv.require("id")?)
                .await?;
            inv.fill_edit_form(&mut form).await?;
            let message = state.news_post_service.update_news_post(&form).await?;
            println!("{}", Notice::success(message));
        }
        Command::Users => {
            let mut view = UsersView::new(state.users_service.clone());
            print_users(view.refresh().await?);
        }
        Command::CreateUser => {
            let mut form = inv.user_form().await?;
            let message = state.users_service.create_user(&mut form).await?;
            println!("{}", Notice::success(message));
        }
        Command::DeleteUser => {
            let mut view = UsersView::new(state.users_service.clone());
            println!("{}", view.delete(inv.require("id")?).await?);
            print_users(view.users());
        }
        Command::Ads => {
            for (slot, ad) in state.ads_service.get_slots().await? {
                match ad {
                    Some(ad) => println!(
                        "{:<16} {}  → {}",
                        slot.to_string(),
                        ad.image.as_deref().unwrap_or("-"),
                        ad.redirect_url.as_deref().unwrap_or("-")
                    ),
                    None => println!("{:<16} (empty)", slot.to_string()),
                }
            }
        }
        Command::UploadAd => {
            let form = inv.ad_form().await?;
            let message = state.ads_service.upload(&form).await?;
            println!("{}", Notice::success(message));
        }
        Command::Versions => {
            for version in state.app_version_service.get_app_versions().await? {
                println!(
                    "{:<8} {:<10} force={:<5} {}",
                    format!("{:?}", version.platform).to_lowercase(),
                    version.version,
                    version.force_update,
                    version.release_notes.as_deref().unwrap_or("")
                );
            }
        }
        Command::PublishVersion => {
            let message = state.app_version_service.publish(inv.app_version()?).await?;
            println!("{}", Notice::success(message));
        }
        Command::UploadImage => {
            let image = MediaFile::from_path(Path::new(inv.require("file")?)).await?;
            println!("{}", state.upload_service.upload_image(image).await?);
        }
    }
    Ok(())
}

fn pending_view(state: &AppState) -> PendingView {
    PendingView::new(
        state.dashboard_service.clone(),
        state.moderation_service.clone(),
    )
}

async fn show_dashboard(state: &AppState) -> Result<()> {
    let mut view = DashboardView::new(state.dashboard_service.clone());
    let summary = view.refresh().await?;
    let stats = &summary.stats;
    println!(
        "posts {}  pending {}  approved {}  rejected {}  users {}",
        stats.total_posts,
        stats.pending_posts,
        stats.approved_posts,
        stats.rejected_posts,
        stats.total_users
    );
    println!("\nRecent pending:");
    print_posts(&summary.recent_pending);
    Ok(())
}

fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("(no posts)");
        return;
    }
    for post in posts {
        println!(
            "{:<26} {:<9} {:<14} {}  [{}]",
            post.id,
            post.status.map(|s| s.as_str()).unwrap_or("-"),
            post.category,
            post.title,
            post.author_name().unwrap_or_default()
        );
    }
}

fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("(no users)");
        return;
    }
    for user in users {
        println!(
            "{:<26} {:<10} {:<24} {:<28} {:<13} {} {} {:?}",
            user.id,
            user.role.map(|r| r.to_string()).unwrap_or_else(|| "-".into()),
            user.name,
            user.email,
            user.phone,
            user.state,
            user.district,
            user.status
        );
    }
}
