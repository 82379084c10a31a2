use portfolio_wasm::app::ContactField;
use portfolio_wasm::catalog::Catalog;
use portfolio_wasm::modal::{ModalState, ModalView};
use portfolio_wasm::{App, PortfolioError, SiteConfig, UiEvent};

fn catalog() -> Catalog {
    SiteConfig::builtin().unwrap().catalog.clone()
}

#[test]
fn open_and_close_project() {
    let catalog = catalog();
    let ids: Vec<_> = catalog.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, ["mship", "pacman", "monster", "arproto"]);

    let mut modal = ModalState::new();
    modal.open_project(&catalog, "pacman").unwrap();
    assert_eq!(modal.active_project(&catalog).map(|r| r.id), Some("pacman"));
    assert_eq!(
        modal.layers(&catalog),
        vec![ModalView::Project(catalog.get("pacman").unwrap())]
    );

    modal.close_project();
    assert!(modal.active_project(&catalog).is_none());
    assert!(modal.layers(&catalog).is_empty());
}

#[test]
fn unknown_project_reports_not_found_and_stays_closed() {
    let catalog = catalog();
    let mut modal = ModalState::new();
    let err = modal.open_project(&catalog, "doesnotexist").unwrap_err();
    assert_eq!(
        err,
        PortfolioError::NotFound {
            id: "doesnotexist".into()
        }
    );
    assert!(modal.active_project(&catalog).is_none());

    // A bad id after a good one clears the active project.
    modal.open_project(&catalog, "monster").unwrap();
    assert!(modal.open_project(&catalog, "nope").is_err());
    assert!(modal.active_project(&catalog).is_none());
}

#[test]
fn close_and_open_are_idempotent() {
    let catalog = catalog();
    let mut modal = ModalState::new();
    modal.close_project();
    assert!(modal.active_project(&catalog).is_none());

    modal.open_contact();
    modal.open_contact();
    assert!(modal.is_contact_open());
    modal.close_contact();
    modal.close_contact();
    assert!(!modal.is_contact_open());
}

#[test]
fn project_and_contact_can_both_be_open() {
    let catalog = catalog();
    let mut modal = ModalState::new();
    modal.open_contact();
    modal.open_project(&catalog, "arproto").unwrap();
    let layers = modal.layers(&catalog);
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[1], ModalView::Contact);

    assert!(modal.dismiss_top());
    assert!(!modal.is_contact_open());
    assert!(modal.active_project(&catalog).is_some());
    assert!(modal.dismiss_top());
    assert!(!modal.dismiss_top());
}

#[test]
fn contact_submit_validates_then_clears() {
    let mut modal = ModalState::new();
    modal.open_contact();
    modal.draft_mut().name = "Ada".into();
    modal.draft_mut().email = "ada.example.com".into();
    modal.draft_mut().message = "Hello".into();
    assert_eq!(
        modal.submit_contact(),
        Err(PortfolioError::InvalidContact { field: "email" })
    );
    assert!(modal.is_contact_open());
    assert_eq!(modal.draft().name, "Ada");

    modal.draft_mut().email = " ada@example.com ".into();
    let sent = modal.submit_contact().unwrap();
    assert_eq!(sent.email, "ada@example.com");
    assert!(!modal.is_contact_open());
    assert!(modal.draft().name.is_empty());
}

#[test]
fn app_drains_events_in_order_before_stepping() {
    let mut app = App::new(SiteConfig::builtin().unwrap());
    let queue = app.queue();
    queue
        .borrow_mut()
        .push_back(UiEvent::OpenProject("pacman".into()));
    queue.borrow_mut().push_back(UiEvent::CloseProject);
    queue
        .borrow_mut()
        .push_back(UiEvent::OpenProject("monster".into()));
    app.push(UiEvent::PointerEnter("mship".into()));
    app.push(UiEvent::PointerLeave("mship".into()));
    app.push(UiEvent::PointerEnter("arproto".into()));

    app.frame(0.0).unwrap();
    assert!(queue.borrow().is_empty());
    let layers = app.modal_layers();
    assert!(matches!(layers.as_slice(), [ModalView::Project(r)] if r.id == "monster"));

    let portals = app.scene().portals();
    assert!(!portals[0].is_hovered());
    assert!(portals[3].is_hovered());
    assert!(portals[3].scale().x > 1.0);
    assert_eq!(portals[0].scale().x, 1.0);
}

#[test]
fn app_survives_bad_input() {
    let mut app = App::new(SiteConfig::builtin().unwrap());
    app.push(UiEvent::OpenProject("doesnotexist".into()));
    app.push(UiEvent::PointerEnter("ghost".into()));
    app.push(UiEvent::SubmitContact);
    app.frame(16.0).unwrap();
    assert!(app.modal_layers().is_empty());
    assert!(app.last_submission().is_none());

    assert!(app.frame(f64::INFINITY).is_err());
    let tick = app.frame(32.0).unwrap();
    assert!((tick.delta - 0.016).abs() < 1e-6);
}

#[test]
fn app_contact_flow_and_camera_input() {
    let mut app = App::new(SiteConfig::builtin().unwrap());
    app.push(UiEvent::OpenContact);
    app.push(UiEvent::EditContact(ContactField::Name, "Grace".into()));
    app.push(UiEvent::EditContact(ContactField::Email, "grace@navy.mil".into()));
    app.push(UiEvent::EditContact(ContactField::Message, "COBOL?".into()));
    app.push(UiEvent::SubmitContact);
    for _ in 0..50 {
        app.push(UiEvent::Wheel(3.0));
    }
    app.frame(0.0).unwrap();

    assert_eq!(app.last_submission().map(|s| s.name.as_str()), Some("Grace"));
    assert!(!app.modal().is_contact_open());
    assert_eq!(app.camera().distance(), 12.0);

    app.push(UiEvent::OpenContact);
    app.push(UiEvent::Escape);
    app.frame(16.0).unwrap();
    assert!(app.modal_layers().is_empty());
}

#[test]
fn hud_bar_tracks_projects_explored() {
    let mut app = App::new(SiteConfig::builtin().unwrap());
    assert_eq!(app.hud().progress_width(), "0%");

    app.push(UiEvent::OpenProject("pacman".into()));
    app.push(UiEvent::CloseProject);
    app.push(UiEvent::OpenProject("pacman".into()));
    app.push(UiEvent::OpenProject("doesnotexist".into()));
    app.frame(0.0).unwrap();
    assert_eq!(app.hud().progress_width(), "25%");

    for id in ["mship", "monster", "arproto"] {
        app.push(UiEvent::OpenProject(id.into()));
    }
    app.frame(16.0).unwrap();
    assert_eq!(app.hud().progress(), 100.0);
}
