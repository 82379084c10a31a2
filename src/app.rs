//! Top-level application state. Browser callbacks only enqueue [`UiEvent`]s;
//! the frame callback drains them in order and then steps the scene, so all
//! mutation happens from one place.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use crate::camera::OrbitController;
use crate::clock::{FrameClock, FrameTick};
use crate::config::SiteConfig;
use crate::error::Result;
use crate::hud::Hud;
use crate::modal::{ContactSubmission, ModalState, ModalView};
use crate::scene::{SceneComposer, SceneFrame};

#[derive(Debug, Clone, PartialEq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PointerEnter(String),
    PointerLeave(String),
    OpenProject(String),
    CloseProject,
    OpenContact,
    CloseContact,
    EditContact(ContactField, String),
    SubmitContact,
    Escape,
    Drag { dx: f32, dy: f32 },
    Wheel(f32),
    Resize { width: f32, height: f32 },
}

/// Shared single-consumer queue. Handlers push, [`App::drain`] pops.
pub type EventQueue = Rc<RefCell<VecDeque<UiEvent>>>;

pub struct App {
    config: Rc<SiteConfig>,
    clock: FrameClock,
    scene: SceneComposer,
    camera: OrbitController,
    modal: ModalState,
    hud: Hud,
    /// Projects opened at least once this session; drives the HUD bar.
    visited: HashSet<&'static str>,
    queue: EventQueue,
    last_submission: Option<ContactSubmission>,
}

impl App {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self {
            scene: SceneComposer::new(config.clone()),
            config,
            clock: FrameClock::new(),
            camera: OrbitController::new(),
            modal: ModalState::new(),
            hud: Hud::default(),
            visited: HashSet::new(),
            queue: Rc::new(RefCell::new(VecDeque::new())),
            last_submission: None,
        }
    }

    pub fn queue(&self) -> EventQueue {
        self.queue.clone()
    }

    pub fn push(&self, event: UiEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Handle every queued event in arrival order.
    pub fn drain(&mut self) {
        loop {
            // Release the borrow before handling so handlers may enqueue.
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else { break };
            self.handle(event);
        }
    }

    /// Handle one event to completion. Failures are logged and dropped.
    pub fn handle(&mut self, event: UiEvent) {
        log::trace!("ui event {event:?}");
        match event {
            UiEvent::PointerEnter(id) => match self.scene.portal_mut(&id) {
                Some(portal) => portal.pointer_enter(),
                None => log::warn!("hover on unknown portal `{id}`"),
            },
            UiEvent::PointerLeave(id) => {
                if let Some(portal) = self.scene.portal_mut(&id) {
                    portal.pointer_leave();
                }
            }
            UiEvent::OpenProject(id) => {
                // NotFound is already logged; the modal just stays closed.
                if self.modal.open_project(&self.config.catalog, &id).is_ok() {
                    self.mark_visited();
                }
            }
            UiEvent::CloseProject => self.modal.close_project(),
            UiEvent::OpenContact => self.modal.open_contact(),
            UiEvent::CloseContact => self.modal.close_contact(),
            UiEvent::EditContact(field, value) => {
                let draft = self.modal.draft_mut();
                match field {
                    ContactField::Name => draft.name = value,
                    ContactField::Email => draft.email = value,
                    ContactField::Message => draft.message = value,
                }
            }
            UiEvent::SubmitContact => match self.modal.submit_contact() {
                Ok(submission) => self.last_submission = Some(submission),
                Err(err) => log::warn!("contact form rejected: {err}"),
            },
            UiEvent::Escape => {
                self.modal.dismiss_top();
            }
            UiEvent::Drag { dx, dy } => self.camera.drag(dx, dy),
            UiEvent::Wheel(notches) => self.camera.zoom(notches),
            UiEvent::Resize { width, height } => self.camera.resize(width, height),
        }
    }

    /// One host frame: drain input, then advance animation.
    pub fn frame(&mut self, now_ms: f64) -> Result<FrameTick> {
        self.drain();
        let tick = self.clock.tick(now_ms)?;
        self.step(&tick);
        Ok(tick)
    }

    /// Advance animation by an explicit tick.
    pub fn step(&mut self, tick: &FrameTick) {
        self.camera.update();
        self.scene.step(tick);
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneComposer {
        &self.scene
    }

    pub fn scene_frame(&self) -> SceneFrame<'_> {
        self.scene.frame()
    }

    pub fn camera(&self) -> &OrbitController {
        &self.camera
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn modal_layers(&self) -> Vec<ModalView<'_>> {
        self.modal.layers(&self.config.catalog)
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    fn mark_visited(&mut self) {
        let catalog = &self.config.catalog;
        if let Some(record) = self.modal.active_project(catalog) {
            self.visited.insert(record.id);
            let explored = self.visited.len() as f32 / catalog.len() as f32;
            self.hud.set_progress(explored * 100.0);
        }
    }

    pub fn last_submission(&self) -> Option<&ContactSubmission> {
        self.last_submission.as_ref()
    }
}
