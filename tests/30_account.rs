mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;

use projcart_client::error::ValidationError;
use projcart_client::loading::LoadingTracker;
use projcart_client::session::{FileTokenStore, MemoryTokenStore, TokenStore};
use projcart_client::views::{
    capture_oauth_redirect, require_session, ConfirmAction, DashboardView, LoginForm,
    ProfileView, Route,
};
use projcart_client::ClientError;

#[tokio::test]
async fn login_stores_token_and_unlocks_dashboard() -> Result<()> {
    let api = common::spawn(common::seeded_state()).await?;
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let client = api.client(Arc::clone(&tokens));
    assert_eq!(require_session(tokens.as_ref()), Err(Route::Login));

    let mut form = LoginForm::new(common::EMAIL, common::PASSWORD);
    let route = form.submit(&client, tokens.as_ref(), &LoadingTracker::new()).await?;

    assert_eq!(route, Route::Dashboard);
    assert_eq!(require_session(tokens.as_ref()), Ok(common::TOKEN.to_string()));

    let mut dashboard = DashboardView::new(LoadingTracker::new());
    assert_eq!(dashboard.load(&client).await, Ok(()));
    assert_eq!(dashboard.count(), 2);
    Ok(())
}

#[tokio::test]
async fn login_rejection_shows_server_text() -> Result<()> {
    let api = common::spawn(common::seeded_state()).await?;
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let client = api.client(Arc::clone(&tokens));

    let mut form = LoginForm::new(common::EMAIL, "wrong");
    let err = form
        .submit(&client, tokens.as_ref(), &LoadingTracker::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Request(ref e) if e.is_unauthorized()));
    assert_eq!(form.error(), Some("Invalid credentials"));
    assert!(!tokens.is_logged_in());
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let api = common::spawn(common::seeded_state()).await?;
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let client = api.client(Arc::clone(&tokens));

    let mut form = LoginForm::new(common::EMAIL, "");
    let err = form
        .submit(&client, tokens.as_ref(), &LoadingTracker::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(ValidationError::CredentialsRequired)));
    assert_eq!(form.error(), Some("Email and password are required"));
    Ok(())
}

#[tokio::test]
async fn oauth_redirect_persists_token_to_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileTokenStore::new(dir.path());

    let route = capture_oauth_redirect(
        &format!("http://localhost:5173/oauth-success?token={}", common::TOKEN),
        &store,
    )?;
    assert_eq!(route, Route::Dashboard);

    // a fresh store over the same directory sees the session
    let reopened = FileTokenStore::new(dir.path());
    assert_eq!(reopened.token().as_deref(), Some(common::TOKEN));
    Ok(())
}

#[tokio::test]
async fn profile_rename_and_cancel() -> Result<()> {
    let api = common::spawn(common::seeded_state()).await?;
    let (client, tokens) = api.signed_in();
    let mut view = ProfileView::new(tokens, LoadingTracker::new());

    view.load(&client)
        .await
        .map_err(|r| anyhow::anyhow!("redirected to {}", r.path()))?;
    assert_eq!(view.user().map(|u| u.name.as_str()), Some("Ada"));
    assert_eq!(view.user().map(|u| u.initials()), Some("Ad".to_string()));

    view.start_edit();
    view.set_name_input("Someone Else");
    view.cancel_edit();
    assert!(!view.is_editing());
    assert_eq!(view.name_input(), "Ada");

    view.start_edit();
    view.set_name_input("   ");
    let err = view.save_name(&client).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(ValidationError::NameRequired)));
    assert_eq!(view.error(), Some("Name cannot be empty"));

    view.set_name_input("  Ada Lovelace ");
    view.save_name(&client).await?;
    assert!(!view.is_editing());
    assert!(view.error().is_none());
    assert_eq!(view.user().map(|u| u.name.as_str()), Some("Ada Lovelace"));
    Ok(())
}

#[tokio::test]
async fn profile_loads_when_me_has_null_projects() -> Result<()> {
    let api = common::spawn(common::MockState {
        null_projects: true,
        ..common::seeded_state()
    })
    .await?;
    let (client, tokens) = api.signed_in();
    let mut view = ProfileView::new(tokens, LoadingTracker::new());

    assert_eq!(view.load(&client).await, Ok(()));
    assert_eq!(view.user().map(|u| u.name.as_str()), Some("Ada"));
    Ok(())
}

#[tokio::test]
async fn profile_load_failure_redirects_to_login() -> Result<()> {
    let api = common::spawn(common::seeded_state()).await?;
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("expired"));
    let client = api.client(Arc::clone(&tokens));
    let mut view = ProfileView::new(tokens, LoadingTracker::new());

    assert_eq!(view.load(&client).await, Err(Route::Login));
    assert_eq!(view.error(), Some("Unauthorized"));
    assert!(view.user().is_none());
    Ok(())
}

#[tokio::test]
async fn logout_confirmation_clears_token() -> Result<()> {
    let api = common::spawn(common::seeded_state()).await?;
    let (client, tokens) = api.signed_in();
    let mut view = ProfileView::new(Arc::clone(&tokens), LoadingTracker::new());

    assert_eq!(view.confirm(&client).await?, None);

    view.open_confirm(ConfirmAction::Logout);
    assert_eq!(view.pending_confirm(), Some(ConfirmAction::Logout));
    assert_eq!(view.confirm(&client).await?, Some(Route::Home));
    assert!(!tokens.is_logged_in());
    assert!(view.pending_confirm().is_none());
    Ok(())
}

#[tokio::test]
async fn delete_account_clears_token_and_goes_to_signup() -> Result<()> {
    let api = common::spawn(common::seeded_state()).await?;
    let (client, tokens) = api.signed_in();
    let mut view = ProfileView::new(Arc::clone(&tokens), LoadingTracker::new());
    view.load(&client)
        .await
        .map_err(|r| anyhow::anyhow!("redirected to {}", r.path()))?;

    view.open_confirm(ConfirmAction::Delete);
    assert_eq!(view.confirm(&client).await?, Some(Route::Signup));
    assert!(!tokens.is_logged_in());
    assert!(view.user().is_none());
    assert!(api.state.lock().unwrap().user.is_none());
    Ok(())
}

#[tokio::test]
async fn failed_account_delete_keeps_session() -> Result<()> {
    let api = common::spawn(common::seeded_state()).await?;
    let (client, tokens) = api.signed_in();
    let mut view = ProfileView::new(Arc::clone(&tokens), LoadingTracker::new());

    view.open_confirm(ConfirmAction::Delete);
    api.fail_next(StatusCode::INTERNAL_SERVER_ERROR, "");
    assert!(view.confirm(&client).await.is_err());

    assert_eq!(view.error(), Some("Failed to delete account"));
    assert!(tokens.is_logged_in());
    assert_eq!(view.pending_confirm(), Some(ConfirmAction::Delete));
    Ok(())
}
