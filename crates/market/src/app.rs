//! Event-driven runtime.
//!
//! [`App`] owns the store, the active route, the toast and the render-local
//! UI state. Every [`Event`] (a navigation or a user action) is applied and
//! followed by a full re-render of the active view inside the page shell.
//! Action failures never escape: they become toasts and the current view is
//! rendered again.
//!
//! The UPI countdown and the home slideshow are driven by
//! [`App::await_payment`] and [`App::run_slideshow`], which re-render on every
//! tick.

use askama::Template;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use craftify_core::{Email, ListingId, PaymentMethod, Role, UserId};

use crate::chrome::{Chrome, LayoutTemplate, page_title};
use crate::config::MarketConfig;
use crate::db::{
    CartRepository, Db, ListingDraft, ListingRepository, NewUser, OrderRepository,
    UserRepository,
};
use crate::error::{AppError, Result};
use crate::models::{Address, OrderLine, Profile, Session};
use crate::notice::Toaster;
use crate::router::Route;
use crate::timers::{Countdown, Slideshow};
use crate::views::artist::ARTIST_ONLY;
use crate::views::auth::{DEFAULT_DISPLAY_NAME, MIN_PASSWORD_LEN};
use crate::views::checkout::EMPTY_CART;
use crate::views::{self, MarketQuery, Outcome, UiState, ViewContext, home};

/// Redirect chains longer than this are cut short.
const MAX_REDIRECTS: usize = 4;

/// Body shown when a view fails to render.
const FALLBACK_BODY: &str = r#"<section class="card"><div class="card-body"><p class="muted">Something went wrong.</p></div></section>"#;

/// Signup form input.
#[derive(Debug)]
pub struct SignupForm {
    pub role: Role,
    pub email: String,
    pub password: SecretString,
    pub name: String,
    pub bio: String,
    /// Avatar as a data URL, or empty.
    pub avatar: String,
}

/// Listing publish form input.
#[derive(Debug, Clone, Default)]
pub struct ListingForm {
    pub title: String,
    pub price: String,
    pub desc: String,
    pub region: String,
    /// Image as a data URL, or empty.
    pub img: String,
}

/// Profile edit form input.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub bio: String,
    /// New avatar as a data URL; `None` keeps the current one.
    pub avatar: Option<String>,
}

/// Checkout form input.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub payment_method: PaymentMethod,
    pub upi_id: String,
}

impl CheckoutForm {
    fn into_address(self) -> Address {
        let upi_id = self.upi_id.trim();
        let upi_id = (self.payment_method == PaymentMethod::Upi && !upi_id.is_empty())
            .then(|| upi_id.to_owned());
        Address {
            full_name: self.full_name,
            phone: self.phone,
            street: self.street,
            city: self.city,
            state: self.state,
            zip: self.zip,
            country: self.country,
            payment_method: self.payment_method,
            upi_id,
        }
    }
}

/// A user action.
#[derive(Debug)]
pub enum Action {
    Login {
        email: String,
        password: SecretString,
    },
    Signup(SignupForm),
    Logout,
    AddToCart(ListingId),
    IncrementQty(ListingId),
    DecrementQty(ListingId),
    RemoveFromCart(ListingId),
    ClearCart,
    SaveArtistProfile {
        name: String,
        bio: String,
    },
    PublishListing(ListingForm),
    BeginEdit(ListingId),
    CancelEdit,
    SaveEdit {
        id: ListingId,
        title: String,
        price: String,
        desc: String,
    },
    DeleteListing(ListingId),
    BeginProfileEdit,
    CancelProfileEdit,
    SaveProfile(ProfileForm),
    SetMarketQuery(MarketQuery),
    AdvanceSlideshow,
    PlaceOrder(CheckoutForm),
}

/// Something that happened in the UI.
#[derive(Debug)]
pub enum Event {
    /// The location fragment changed.
    Navigate(String),
    Action(Action),
}

/// A fully rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub route: Route,
    /// Full document title.
    pub title: String,
    /// The whole document, shell included.
    pub html: String,
    /// Visible toast, if any.
    pub toast: Option<String>,
}

/// A UPI order waiting for its countdown.
#[derive(Debug, Clone)]
struct PendingPayment {
    user_id: UserId,
    lines: Vec<OrderLine>,
    address: Address,
    countdown: Countdown,
}

/// The marketplace runtime.
pub struct App {
    db: Db,
    config: MarketConfig,
    route: Route,
    toaster: Toaster,
    ui: UiState,
    pending: Option<PendingPayment>,
}

impl App {
    /// Start the runtime on the home view, seeding the store first.
    #[must_use]
    pub fn new(db: Db, config: MarketConfig) -> Self {
        let report = crate::seed::run(&db);
        if report.changed() {
            tracing::info!(?report, "Store initialized");
        }

        Self {
            toaster: Toaster::new(config.toast_ttl),
            db,
            config,
            route: Route::Home,
            ui: UiState::default(),
            pending: None,
        }
    }

    /// The underlying store.
    #[must_use]
    pub const fn db(&self) -> &Db {
        &self.db
    }

    /// The active route.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Render-local UI state.
    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// The latest toast, even if it has already expired.
    #[must_use]
    pub fn last_toast(&self) -> Option<&str> {
        self.toaster.last()
    }

    /// Whether a UPI payment is counting down.
    #[must_use]
    pub const fn payment_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Render the active view without changing anything.
    pub fn screen(&mut self) -> Screen {
        self.update()
    }

    /// Apply an event and re-render.
    #[instrument(skip_all, fields(route = %self.route))]
    pub fn handle(&mut self, event: Event) -> Screen {
        match event {
            Event::Navigate(fragment) => self.navigate(Route::parse(&fragment)),
            Event::Action(action) => {
                if let Err(err) = self.dispatch(action) {
                    if err.is_validation() {
                        tracing::debug!(error = %err, "Action rejected");
                    } else {
                        tracing::warn!(error = %err, "Action failed");
                    }
                    self.toaster.show(err.toast_message());
                }
            }
        }
        self.update()
    }

    /// Run the pending UPI countdown to completion, then place the order.
    ///
    /// `on_tick` receives the countdown and the re-rendered screen after
    /// every tick. Without a pending payment this just renders the active
    /// view.
    pub async fn await_payment<F>(&mut self, mut on_tick: F) -> Screen
    where
        F: FnMut(&Countdown, &Screen),
    {
        let Some(pending) = self.pending.take() else {
            return self.update();
        };

        pending
            .countdown
            .run(|countdown| {
                self.ui.countdown = Some(*countdown);
                on_tick(countdown, &self.update());
            })
            .await;

        self.ui.countdown = None;
        self.place_order(&pending.user_id, pending.lines, pending.address);
        self.update()
    }

    /// Rotate the home slideshow `rounds` times at the configured period.
    ///
    /// `on_change` receives the slideshow and the re-rendered screen after
    /// every rotation.
    pub async fn run_slideshow<F>(&mut self, rounds: usize, mut on_change: F) -> Screen
    where
        F: FnMut(&Slideshow, &Screen),
    {
        let mut show = home::slideshow(self.config.slideshow_period);
        for _ in 0..self.ui.slide_index {
            show.advance();
        }

        show.run(rounds, |s| {
            self.ui.slide_index = s.index();
            on_change(s, &self.update());
        })
        .await;
        self.update()
    }

    fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "Navigate");
        self.ui.reset_for_navigation();
        self.route = route;
    }

    fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Login { email, password } => self.login(&email, &password),
            Action::Signup(form) => self.signup(form),
            Action::Logout => {
                self.db.set_session(None);
                self.toaster.show("Logged out");
                Ok(())
            }
            Action::AddToCart(id) => self.add_to_cart(&id),
            Action::IncrementQty(id) => self.change_qty(&id, 1),
            Action::DecrementQty(id) => self.change_qty(&id, -1),
            Action::RemoveFromCart(id) => {
                if let Some(session) = self.session_or_login() {
                    CartRepository::new(&self.db).remove(&session.user_id, &id);
                }
                Ok(())
            }
            Action::ClearCart => {
                if let Some(session) = self.session_or_login() {
                    CartRepository::new(&self.db).clear(&session.user_id);
                }
                Ok(())
            }
            Action::SaveArtistProfile { name, bio } => {
                let Some(session) = self.artist_or_redirect() else {
                    return Ok(());
                };
                UserRepository::new(&self.db).save_profile(&session.user_id, &name, &bio)?;
                self.toaster.show("Profile saved");
                Ok(())
            }
            Action::PublishListing(form) => self.publish(form),
            Action::BeginEdit(id) => self.begin_edit(id),
            Action::CancelEdit => {
                self.ui.editing_listing = None;
                Ok(())
            }
            Action::SaveEdit {
                id,
                title,
                price,
                desc,
            } => self.save_edit(&id, &title, &price, &desc),
            Action::DeleteListing(id) => self.delete_listing(&id),
            Action::BeginProfileEdit => {
                if self.session_or_login().is_some() {
                    self.ui.editing_profile = true;
                }
                Ok(())
            }
            Action::CancelProfileEdit => {
                self.ui.editing_profile = false;
                Ok(())
            }
            Action::SaveProfile(form) => self.save_profile(form),
            Action::SetMarketQuery(query) => {
                self.ui.market = query;
                Ok(())
            }
            Action::AdvanceSlideshow => {
                self.ui.slide_index = (self.ui.slide_index + 1) % home::SLIDES.len();
                Ok(())
            }
            Action::PlaceOrder(form) => self.checkout(form),
        }
    }

    /// The active session, or navigate to login.
    fn session_or_login(&mut self) -> Option<Session> {
        let session = self.db.session();
        if session.is_none() {
            self.navigate(Route::Login);
        }
        session
    }

    /// The active artist session, or navigate away.
    fn artist_or_redirect(&mut self) -> Option<Session> {
        let session = self.session_or_login()?;
        if session.is_artist() {
            Some(session)
        } else {
            self.toaster.show(ARTIST_ONLY);
            self.navigate(Route::Market);
            None
        }
    }

    #[instrument(skip(self, password))]
    fn login(&mut self, email: &str, password: &SecretString) -> Result<()> {
        let user = UserRepository::new(&self.db).authenticate(email, password)?;
        self.db.set_session(Some(&Session {
            user_id: user.id.clone(),
            role: user.role,
        }));
        tracing::info!(user_id = %user.id, "Logged in");

        self.toaster.show("Logged in");
        self.navigate(Route::Market);
        Ok(())
    }

    #[instrument(skip(self, form), fields(role = %form.role))]
    fn signup(&mut self, form: SignupForm) -> Result<()> {
        let email = Email::parse(&form.email)?;
        if form.password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let name = form.name.trim();
        let user = UserRepository::new(&self.db).create(NewUser {
            email,
            password: form.password,
            role: form.role,
            profile: Profile {
                name: if name.is_empty() {
                    DEFAULT_DISPLAY_NAME.to_string()
                } else {
                    name.to_owned()
                },
                bio: form.bio,
                avatar: form.avatar,
            },
        })?;
        self.db.set_session(Some(&Session {
            user_id: user.id.clone(),
            role: user.role,
        }));

        self.toaster.show("Account created");
        self.navigate(if user.is_artist() {
            Route::Artist
        } else {
            Route::Market
        });
        Ok(())
    }

    fn add_to_cart(&mut self, id: &ListingId) -> Result<()> {
        let Some(session) = self.session_or_login() else {
            return Ok(());
        };
        if ListingRepository::new(&self.db).get(id).is_none() {
            tracing::warn!(listing_id = %id, "Add to cart for missing listing");
            return Err(AppError::NotFound(
                "Listing is no longer available".to_string(),
            ));
        }

        CartRepository::new(&self.db).add(&session.user_id, id);
        self.toaster.show("Added to cart");
        Ok(())
    }

    fn change_qty(&mut self, id: &ListingId, delta: i64) -> Result<()> {
        if let Some(session) = self.session_or_login() {
            CartRepository::new(&self.db).change_qty(&session.user_id, id, delta);
        }
        Ok(())
    }

    fn publish(&mut self, form: ListingForm) -> Result<()> {
        let Some(session) = self.artist_or_redirect() else {
            return Ok(());
        };
        let draft = ListingDraft::parse(&form.title, &form.price, &form.desc)?;
        ListingRepository::new(&self.db).publish(&session.user_id, draft, &form.region, form.img);
        self.toaster.show("Listing published");
        Ok(())
    }

    fn begin_edit(&mut self, id: ListingId) -> Result<()> {
        let Some(session) = self.artist_or_redirect() else {
            return Ok(());
        };
        let listing = ListingRepository::new(&self.db)
            .get(&id)
            .ok_or_else(|| AppError::NotFound("Listing is no longer available".to_string()))?;
        if listing.artist_id != session.user_id {
            return Err(AppError::Forbidden(
                "You can only edit your own listings".to_string(),
            ));
        }

        self.ui.editing_listing = Some(id);
        Ok(())
    }

    fn save_edit(&mut self, id: &ListingId, title: &str, price: &str, desc: &str) -> Result<()> {
        let Some(session) = self.artist_or_redirect() else {
            return Ok(());
        };
        let draft = ListingDraft::parse(title, price, desc)?;
        ListingRepository::new(&self.db).update(&session.user_id, id, draft)?;

        self.ui.editing_listing = None;
        self.toaster.show("Listing updated");
        Ok(())
    }

    fn delete_listing(&mut self, id: &ListingId) -> Result<()> {
        let Some(session) = self.artist_or_redirect() else {
            return Ok(());
        };
        ListingRepository::new(&self.db).delete(&session.user_id, id)?;

        if self.ui.editing_listing.as_ref() == Some(id) {
            self.ui.editing_listing = None;
        }
        self.toaster.show("Listing removed");
        Ok(())
    }

    fn save_profile(&mut self, form: ProfileForm) -> Result<()> {
        let Some(session) = self.session_or_login() else {
            return Ok(());
        };
        let users = UserRepository::new(&self.db);
        let current = users
            .get_by_id(&session.user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", session.user_id)))?;

        let email = Email::parse(&form.email)?;
        let profile = Profile {
            name: form.name.trim().to_owned(),
            bio: form.bio,
            avatar: form.avatar.unwrap_or(current.profile.avatar),
        };
        users.update_account(&session.user_id, email, profile)?;

        self.ui.editing_profile = false;
        self.toaster.show("Profile updated");
        Ok(())
    }

    #[instrument(skip(self, form), fields(method = %form.payment_method))]
    fn checkout(&mut self, form: CheckoutForm) -> Result<()> {
        let Some(session) = self.session_or_login() else {
            return Ok(());
        };

        let address = form.into_address();
        if let Some(field) = address.first_missing_field() {
            return Err(AppError::validation(format!("{field} is required")));
        }
        let lines = CartRepository::new(&self.db).detailed(&session.user_id);
        if lines.is_empty() {
            return Err(AppError::validation(EMPTY_CART));
        }

        match address.payment_method {
            PaymentMethod::Cod => {
                self.place_order(&session.user_id, lines, address);
            }
            PaymentMethod::Upi => {
                if address.upi_id.is_none() {
                    return Err(AppError::validation("Enter UPI ID"));
                }
                let countdown = Countdown::new(self.config.upi_countdown_secs);
                tracing::info!(secs = countdown.remaining(), "Awaiting UPI payment");
                self.ui.countdown = Some(countdown);
                self.pending = Some(PendingPayment {
                    user_id: session.user_id,
                    lines,
                    address,
                    countdown,
                });
            }
        }
        Ok(())
    }

    fn place_order(&mut self, user_id: &UserId, lines: Vec<OrderLine>, address: Address) {
        let order = OrderRepository::new(&self.db).create(user_id, lines, address);
        CartRepository::new(&self.db).clear(user_id);
        self.toaster.show("Order placed");
        self.navigate(Route::invoice(order.id));
    }

    /// Render the active view, following redirects.
    fn update(&mut self) -> Screen {
        let session = self.db.session();

        for _ in 0..MAX_REDIRECTS {
            let ctx = ViewContext {
                db: &self.db,
                session: session.as_ref(),
                ui: &self.ui,
            };
            match views::render(&self.route, &ctx) {
                Ok(Outcome::Page(page)) => {
                    if let Some(notice) = page.notice {
                        self.toaster.show(notice);
                    }
                    return self.compose(page.title, &page.body, session.as_ref());
                }
                Ok(Outcome::Redirect { to, notice }) => {
                    if let Some(notice) = notice {
                        self.toaster.show(notice);
                    }
                    self.navigate(to);
                }
                Err(err) => {
                    tracing::error!(route = %self.route, error = %err, "View failed to render");
                    self.toaster.show(err.toast_message());
                    return self.compose("", FALLBACK_BODY, session.as_ref());
                }
            }
        }

        tracing::warn!(route = %self.route, "Too many redirects");
        self.compose("", FALLBACK_BODY, session.as_ref())
    }

    /// Wrap a page body in the shell.
    fn compose(&self, title: &str, body: &str, session: Option<&Session>) -> Screen {
        let chrome = Chrome::derive(&self.db, session, &self.route);
        let title = page_title(title);
        let toast = self.toaster.current().map(str::to_owned);

        let html = LayoutTemplate {
            title: &title,
            chrome: &chrome,
            toast: toast.as_deref(),
            content: body,
        }
        .render()
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "Layout failed to render");
            body.to_owned()
        });

        Screen {
            route: self.route.clone(),
            title,
            html,
            toast,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use craftify_core::OrderStatus;

    use super::*;
    use crate::seed::{DEMO_ARTIST_EMAIL, DEMO_ARTIST_PASSWORD};

    fn app() -> App {
        App::new(Db::in_memory(), MarketConfig::default())
    }

    fn act(app: &mut App, action: Action) -> Screen {
        app.handle(Event::Action(action))
    }

    fn go(app: &mut App, fragment: &str) -> Screen {
        app.handle(Event::Navigate(fragment.to_string()))
    }

    fn signup(app: &mut App, email: &str, role: Role) -> Screen {
        act(
            app,
            Action::Signup(SignupForm {
                role,
                email: email.to_string(),
                password: SecretString::from("pass"),
                name: String::new(),
                bio: String::new(),
                avatar: String::new(),
            }),
        )
    }

    fn login_artist(app: &mut App) -> Screen {
        act(
            app,
            Action::Login {
                email: DEMO_ARTIST_EMAIL.to_uppercase(),
                password: SecretString::from(DEMO_ARTIST_PASSWORD),
            },
        )
    }

    fn address(method: PaymentMethod, upi_id: &str) -> CheckoutForm {
        CheckoutForm {
            full_name: "Asha Rao".to_string(),
            phone: "+91 98765 43210".to_string(),
            street: "12 Artisan Lane".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            zip: "411001".to_string(),
            country: "India".to_string(),
            payment_method: method,
            upi_id: upi_id.to_string(),
        }
    }

    fn first_listing(app: &App) -> ListingId {
        app.db().listings().first().unwrap().id.clone()
    }

    #[test]
    fn test_starts_on_seeded_home() {
        let mut app = app();
        let screen = app.screen();
        assert_eq!(screen.route, Route::Home);
        assert_eq!(screen.title, "Craftify — Home");
        assert_eq!(app.db().listings().len(), 4);
    }

    #[test]
    fn test_login_navigates_to_market() {
        let mut app = app();
        let screen = login_artist(&mut app);
        assert_eq!(screen.route, Route::Market);
        assert_eq!(screen.toast.as_deref(), Some("Logged in"));
        assert!(app.db().session().unwrap().is_artist());
    }

    #[test]
    fn test_bad_login_toasts() {
        let mut app = app();
        let screen = act(
            &mut app,
            Action::Login {
                email: DEMO_ARTIST_EMAIL.to_string(),
                password: SecretString::from("nope"),
            },
        );
        assert_eq!(screen.toast.as_deref(), Some("Invalid credentials"));
        assert_eq!(app.db().session(), None);
    }

    #[test]
    fn test_signup_routes_by_role() {
        let mut app = app();
        let screen = signup(&mut app, "maker@example.com", Role::Artist);
        assert_eq!(screen.route, Route::Artist);
        assert_eq!(screen.toast.as_deref(), Some("Account created"));

        let user = UserRepository::new(app.db())
            .get_by_email("maker@example.com")
            .unwrap();
        assert_eq!(user.profile.name, DEFAULT_DISPLAY_NAME);

        act(&mut app, Action::Logout);
        let screen = signup(&mut app, "buyer@example.com", Role::User);
        assert_eq!(screen.route, Route::Market);
    }

    #[test]
    fn test_signup_rejects_duplicates_and_short_passwords() {
        let mut app = app();
        let screen = signup(&mut app, &DEMO_ARTIST_EMAIL.to_uppercase(), Role::User);
        assert_eq!(screen.toast.as_deref(), Some("Email already registered"));
        assert_eq!(app.db().session(), None);

        let screen = act(
            &mut app,
            Action::Signup(SignupForm {
                role: Role::User,
                email: "short@example.com".to_string(),
                password: SecretString::from("abc"),
                name: String::new(),
                bio: String::new(),
                avatar: String::new(),
            }),
        );
        assert_eq!(
            screen.toast.as_deref(),
            Some("Password must be at least 4 characters")
        );
    }

    #[test]
    fn test_logout_rerenders_current_view() {
        let mut app = app();
        signup(&mut app, "buyer@example.com", Role::User);
        go(&mut app, "#/cart");
        let screen = act(&mut app, Action::Logout);
        // Cart needs a session
        assert_eq!(screen.route, Route::Login);
        assert_eq!(screen.toast.as_deref(), Some("Logged out"));
    }

    #[test]
    fn test_add_to_cart_requires_session() {
        let mut app = app();
        let id = first_listing(&app);
        let screen = act(&mut app, Action::AddToCart(id));
        assert_eq!(screen.route, Route::Login);
    }

    #[test]
    fn test_cart_actions() {
        let mut app = app();
        signup(&mut app, "buyer@example.com", Role::User);
        let id = first_listing(&app);

        let screen = act(&mut app, Action::AddToCart(id.clone()));
        assert_eq!(screen.toast.as_deref(), Some("Added to cart"));
        act(&mut app, Action::IncrementQty(id.clone()));
        go(&mut app, "#/cart");

        let user = app.db().session().unwrap().user_id;
        assert_eq!(CartRepository::new(app.db()).item_count(&user), 2);

        act(&mut app, Action::DecrementQty(id.clone()));
        act(&mut app, Action::DecrementQty(id));
        assert_eq!(app.db().carts().get(&user), Some(&Vec::new()));
    }

    #[test]
    fn test_missing_listing_toasts() {
        let mut app = app();
        signup(&mut app, "buyer@example.com", Role::User);
        let screen = act(&mut app, Action::AddToCart(ListingId::new("itm_gone")));
        assert_eq!(
            screen.toast.as_deref(),
            Some("Listing is no longer available")
        );
    }

    #[test]
    fn test_buyer_cannot_publish() {
        let mut app = app();
        signup(&mut app, "buyer@example.com", Role::User);
        let screen = act(
            &mut app,
            Action::PublishListing(ListingForm {
                title: "Vase".to_string(),
                price: "500".to_string(),
                ..ListingForm::default()
            }),
        );
        assert_eq!(screen.route, Route::Market);
        assert_eq!(screen.toast.as_deref(), Some(ARTIST_ONLY));
        assert_eq!(app.db().listings().len(), 4);
    }

    #[test]
    fn test_listing_lifecycle() {
        let mut app = app();
        login_artist(&mut app);
        go(&mut app, "#/artist");

        let screen = act(
            &mut app,
            Action::PublishListing(ListingForm {
                title: "Blue Pottery Vase".to_string(),
                price: "2400".to_string(),
                desc: "Glazed by hand".to_string(),
                region: "Jaipur".to_string(),
                img: String::new(),
            }),
        );
        assert_eq!(screen.toast.as_deref(), Some("Listing published"));
        let id = first_listing(&app);

        act(&mut app, Action::BeginEdit(id.clone()));
        assert_eq!(app.ui().editing_listing.as_ref(), Some(&id));
        act(&mut app, Action::CancelEdit);
        assert_eq!(app.ui().editing_listing, None);

        let screen = act(
            &mut app,
            Action::SaveEdit {
                id: id.clone(),
                title: "Blue Vase".to_string(),
                price: "0".to_string(),
                desc: String::new(),
            },
        );
        assert!(screen.toast.unwrap().starts_with("Invalid price"));

        let screen = act(
            &mut app,
            Action::SaveEdit {
                id: id.clone(),
                title: "Blue Vase".to_string(),
                price: "2600".to_string(),
                desc: String::new(),
            },
        );
        assert_eq!(screen.toast.as_deref(), Some("Listing updated"));
        assert_eq!(
            ListingRepository::new(app.db()).get(&id).unwrap().title,
            "Blue Vase"
        );

        let screen = act(&mut app, Action::DeleteListing(id.clone()));
        assert_eq!(screen.toast.as_deref(), Some("Listing removed"));
        assert!(ListingRepository::new(app.db()).get(&id).is_none());
    }

    #[test]
    fn test_cannot_edit_others_listing() {
        let mut app = app();
        signup(&mut app, "other@example.com", Role::Artist);
        let id = first_listing(&app);
        let screen = act(&mut app, Action::BeginEdit(id));
        assert_eq!(
            screen.toast.as_deref(),
            Some("You can only edit your own listings")
        );
        assert_eq!(app.ui().editing_listing, None);
    }

    #[test]
    fn test_profile_edit() {
        let mut app = app();
        signup(&mut app, "buyer@example.com", Role::User);
        go(&mut app, "#/profile");
        act(&mut app, Action::BeginProfileEdit);
        assert!(app.ui().editing_profile);

        let screen = act(
            &mut app,
            Action::SaveProfile(ProfileForm {
                name: "Asha".to_string(),
                email: DEMO_ARTIST_EMAIL.to_string(),
                bio: String::new(),
                avatar: None,
            }),
        );
        assert_eq!(screen.toast.as_deref(), Some("Email already registered"));
        assert!(app.ui().editing_profile);

        let screen = act(
            &mut app,
            Action::SaveProfile(ProfileForm {
                name: "Asha".to_string(),
                email: "Asha@Example.com".to_string(),
                bio: "Collector".to_string(),
                avatar: None,
            }),
        );
        assert_eq!(screen.toast.as_deref(), Some("Profile updated"));
        assert!(!app.ui().editing_profile);
        let user = UserRepository::new(app.db())
            .get_by_email("asha@example.com")
            .unwrap();
        assert_eq!(user.email.as_str(), "asha@example.com");
        assert_eq!(user.profile.name, "Asha");
    }

    #[test]
    fn test_navigation_resets_ui_state() {
        let mut app = app();
        go(&mut app, "#/market");
        act(
            &mut app,
            Action::SetMarketQuery(MarketQuery {
                q: "madhubani".to_string(),
                ..MarketQuery::default()
            }),
        );
        assert_eq!(app.ui().market.q, "madhubani");
        go(&mut app, "#/");
        assert_eq!(app.ui().market, MarketQuery::default());
    }

    #[test]
    fn test_checkout_validation_order() {
        let mut app = app();
        signup(&mut app, "buyer@example.com", Role::User);

        let mut form = address(PaymentMethod::Upi, "");
        form.city = "  ".to_string();
        let screen = act(&mut app, Action::PlaceOrder(form));
        assert_eq!(screen.toast.as_deref(), Some("City is required"));

        let screen = act(&mut app, Action::PlaceOrder(address(PaymentMethod::Upi, "")));
        assert_eq!(screen.toast.as_deref(), Some(EMPTY_CART));

        let id = first_listing(&app);
        act(&mut app, Action::AddToCart(id));
        let screen = act(&mut app, Action::PlaceOrder(address(PaymentMethod::Upi, " ")));
        assert_eq!(screen.toast.as_deref(), Some("Enter UPI ID"));
        assert!(app.db().orders().is_empty());
    }

    #[test]
    fn test_cod_checkout_places_order() {
        let mut app = app();
        signup(&mut app, "buyer@example.com", Role::User);
        let id = first_listing(&app);
        act(&mut app, Action::AddToCart(id));
        go(&mut app, "#/checkout");

        let screen = act(&mut app, Action::PlaceOrder(address(PaymentMethod::Cod, "")));
        let order = OrderRepository::new(app.db()).latest().unwrap();
        assert_eq!(screen.route, Route::invoice(order.id.clone()));
        assert_eq!(screen.toast.as_deref(), Some("Order placed"));
        assert_eq!(order.status, OrderStatus::ArrivingSoon);
        assert!(screen.html.contains(&order.invoice_number()));

        let user = app.db().session().unwrap().user_id;
        assert!(CartRepository::new(app.db()).rows(&user).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_upi_checkout_waits_for_countdown() {
        let mut app = app();
        signup(&mut app, "buyer@example.com", Role::User);
        let id = first_listing(&app);
        act(&mut app, Action::AddToCart(id));
        go(&mut app, "#/checkout");

        let screen = act(
            &mut app,
            Action::PlaceOrder(address(PaymentMethod::Upi, "asha@upi")),
        );
        assert!(app.payment_pending());
        assert!(screen.html.contains("Open your UPI app to pay… 10s"));
        assert!(app.db().orders().is_empty());

        let start = tokio::time::Instant::now();
        let mut ticks = Vec::new();
        let screen = app
            .await_payment(|countdown, s| {
                ticks.push(countdown.remaining());
                assert!(s.html.contains(&countdown.text()));
            })
            .await;

        assert_eq!(start.elapsed(), Duration::from_secs(10));
        assert_eq!(ticks, (0..10).rev().collect::<Vec<u32>>());
        assert!(!app.payment_pending());
        let order = OrderRepository::new(app.db()).latest().unwrap();
        assert_eq!(order.address.upi_id.as_deref(), Some("asha@upi"));
        assert_eq!(screen.route, Route::invoice(order.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slideshow_rotates() {
        let mut app = app();
        act(&mut app, Action::AdvanceSlideshow);
        assert_eq!(app.ui().slide_index, 1);

        let start = tokio::time::Instant::now();
        let mut seen = Vec::new();
        app.run_slideshow(4, |show, screen| {
            assert_eq!(screen.route, Route::Home);
            seen.push(show.index());
        })
        .await;
        assert_eq!(start.elapsed(), Duration::from_secs(12));
        assert_eq!(seen, vec![2, 3, 0, 1]);
        assert_eq!(app.ui().slide_index, 1);
    }

    #[test]
    fn test_unknown_fragment_falls_back_to_market() {
        let mut app = app();
        let screen = go(&mut app, "#/nowhere");
        assert_eq!(screen.route, Route::Market);
        assert_eq!(screen.title, "Craftify — Market");
    }

    #[test]
    fn test_invoice_without_orders_redirects() {
        let mut app = app();
        let screen = go(&mut app, "#/invoice");
        assert_eq!(screen.route, Route::Market);
        assert_eq!(screen.toast.as_deref(), Some("No invoice available"));
    }
}
