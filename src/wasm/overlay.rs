//! DOM overlay: title, HUD, portal labels and the two modal dialogs.
//! Listeners only push [`UiEvent`]s; [`Overlay::sync`] mirrors app state
//! into the DOM once per frame.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Event, HtmlAnchorElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::app::{App, ContactField, EventQueue, UiEvent};
use crate::modal::ModalView;
use crate::scene::PostEffect;

struct Label {
    id: &'static str,
    element: HtmlElement,
}

struct ProjectModal {
    root: HtmlElement,
    title: HtmlElement,
    subtitle: HtmlElement,
    desc: HtmlElement,
    links: HtmlElement,
    shown: Option<&'static str>,
}

struct ContactModal {
    root: HtmlElement,
    name: HtmlInputElement,
    email: HtmlInputElement,
    message: HtmlTextAreaElement,
}

pub struct Overlay {
    document: Document,
    labels: Vec<Label>,
    progress_fill: HtmlElement,
    project: ProjectModal,
    contact: ContactModal,
}

impl Overlay {
    pub fn mount(document: &Document, app: &App) -> Result<Self, JsValue> {
        let body = document.body().ok_or("no body")?;
        let queue = app.queue();
        let config = app.config();

        // Everything outside explicit controls is click-through.
        let root = element(document, "div", "overlay")?;
        root.set_id("overlay");
        for effect in app.scene_frame().post {
            match effect {
                PostEffect::Noise { opacity } => root
                    .style()
                    .set_property("--grain-opacity", &opacity.to_string())?,
                PostEffect::Vignette { offset, darkness } => {
                    let style = root.style();
                    style.set_property("--vignette-offset", &format!("{}%", offset * 100.0))?;
                    style.set_property("--vignette-darkness", &darkness.to_string())?;
                }
                PostEffect::Bloom { .. } | PostEffect::DepthOfField { .. } => {}
            }
        }
        body.append_child(&root)?;
        root.append_child(&element(document, "div", "grain")?)?;

        let title = element(document, "h1", "title")?;
        title.set_text_content(Some(config.title));
        root.append_child(&title)?;
        let tagline = element(document, "p", "tagline")?;
        tagline.set_text_content(Some(config.tagline));
        root.append_child(&tagline)?;

        let progress_fill = mount_hud(document, &root, app, &queue)?;

        let mut labels = Vec::new();
        for record in config.catalog.records() {
            let label = element(document, "button", "portal-label interactive")?;
            label.set_text_content(Some(record.title));
            label.style().set_property("--accent", record.color)?;
            let id = record.id;
            on(&label, "pointerenter", &queue, move || UiEvent::PointerEnter(id.to_string()))?;
            on(&label, "pointerleave", &queue, move || UiEvent::PointerLeave(id.to_string()))?;
            on(&label, "click", &queue, move || UiEvent::OpenProject(id.to_string()))?;
            root.append_child(&label)?;
            labels.push(Label { id, element: label });
        }

        let project = mount_project_modal(document, &root, &queue)?;
        let contact = mount_contact_modal(document, &root, &queue)?;

        Ok(Self {
            document: document.clone(),
            labels,
            progress_fill,
            project,
            contact,
        })
    }

    pub fn sync(&mut self, app: &App) -> Result<(), JsValue> {
        let frame = app.scene_frame();
        for (label, portal) in self.labels.iter().zip(&frame.portals) {
            debug_assert_eq!(label.id, portal.id);
            let style = label.element.style();
            match app.camera().project(portal.label_anchor) {
                Some(p) => {
                    style.set_property(
                        "transform",
                        &format!("translate({:.1}px, {:.1}px) translate(-50%, -50%)", p.x, p.y),
                    )?;
                    label.element.set_hidden(false);
                }
                None => label.element.set_hidden(true),
            }
            label
                .element
                .class_list()
                .toggle_with_force("hovered", portal.hovered)?;
        }

        self.progress_fill
            .style()
            .set_property("width", &app.hud().progress_width())?;

        let layers = app.modal_layers();
        let project = layers.iter().find_map(|layer| match layer {
            ModalView::Project(record) => Some(*record),
            ModalView::Contact => None,
        });
        match project {
            Some(record) if self.project.shown != Some(record.id) => {
                self.project.title.set_text_content(Some(record.title));
                self.project.subtitle.set_text_content(Some(record.subtitle));
                self.project.desc.set_text_content(Some(record.desc));
                self.project.links.set_inner_html("");
                for link in &record.links {
                    let a = self
                        .document
                        .create_element("a")?
                        .dyn_into::<HtmlAnchorElement>()?;
                    a.set_href(link.href);
                    a.set_text_content(Some(link.label));
                    self.project.links.append_child(&a)?;
                }
                self.project.root.style().set_property("--accent", record.color)?;
                self.project.root.set_hidden(false);
                self.project.shown = Some(record.id);
            }
            Some(_) => {}
            None => {
                self.project.root.set_hidden(true);
                self.project.shown = None;
            }
        }

        let contact_open = layers.contains(&ModalView::Contact);
        self.contact.root.set_hidden(!contact_open);
        if contact_open {
            // Keep the inputs in step with the draft, which clears on submit.
            let draft = app.modal().draft();
            if self.contact.name.value() != draft.name {
                self.contact.name.set_value(&draft.name);
            }
            if self.contact.email.value() != draft.email {
                self.contact.email.set_value(&draft.email);
            }
            if self.contact.message.value() != draft.message {
                self.contact.message.set_value(&draft.message);
            }
        }
        Ok(())
    }
}

fn mount_hud(
    document: &Document,
    root: &HtmlElement,
    app: &App,
    queue: &EventQueue,
) -> Result<HtmlElement, JsValue> {
    let hud = app.hud();
    let panel = element(document, "div", "hud")?;

    let hints = element(document, "ul", "hints")?;
    for &hint in hud.hints {
        let item = element(document, "li", "")?;
        item.set_text_content(Some(hint));
        hints.append_child(&item)?;
    }
    panel.append_child(&hints)?;

    let bar = element(document, "div", "progress")?;
    let caption = element(document, "span", "progress-label")?;
    caption.set_text_content(Some(hud.label));
    let fill = element(document, "div", "progress-fill")?;
    fill.style().set_property("width", &hud.progress_width())?;
    bar.append_child(&caption)?;
    bar.append_child(&fill)?;
    panel.append_child(&bar)?;

    let socials = element(document, "nav", "socials")?;
    for social in hud.socials {
        let a = document.create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
        a.set_class_name("interactive");
        a.set_href(social.href);
        a.set_text_content(Some(social.label));
        socials.append_child(&a)?;
    }
    let contact = element(document, "button", "contact interactive")?;
    contact.set_text_content(Some("Contact"));
    on(&contact, "click", queue, || UiEvent::OpenContact)?;
    socials.append_child(&contact)?;
    panel.append_child(&socials)?;

    root.append_child(&panel)?;
    Ok(fill)
}

fn mount_project_modal(
    document: &Document,
    root: &HtmlElement,
    queue: &EventQueue,
) -> Result<ProjectModal, JsValue> {
    let modal = element(document, "section", "modal interactive")?;
    modal.set_id("project-modal");
    modal.set_hidden(true);
    let close = element(document, "button", "close")?;
    close.set_text_content(Some("×"));
    close.set_attribute("aria-label", "Close project")?;
    on(&close, "click", queue, || UiEvent::CloseProject)?;
    let title = element(document, "h2", "")?;
    let subtitle = element(document, "h3", "")?;
    let desc = element(document, "p", "")?;
    let links = element(document, "div", "links")?;
    for child in [&close, &title, &subtitle, &desc, &links] {
        modal.append_child(child)?;
    }
    root.append_child(&modal)?;
    Ok(ProjectModal {
        root: modal,
        title,
        subtitle,
        desc,
        links,
        shown: None,
    })
}

fn mount_contact_modal(
    document: &Document,
    root: &HtmlElement,
    queue: &EventQueue,
) -> Result<ContactModal, JsValue> {
    let modal = element(document, "section", "modal interactive")?;
    modal.set_id("contact-modal");
    modal.set_hidden(true);

    let close = element(document, "button", "close")?;
    close.set_text_content(Some("×"));
    close.set_attribute("aria-label", "Close contact")?;
    on(&close, "click", queue, || UiEvent::CloseContact)?;
    let heading = element(document, "h2", "")?;
    heading.set_text_content(Some("Get in touch"));

    let name = input(document, "text", "Name")?;
    let email = input(document, "email", "Email")?;
    let message = document
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()?;
    message.set_placeholder("Message");

    for (target, field) in [
        (name.clone().unchecked_into::<HtmlElement>(), ContactField::Name),
        (email.clone().unchecked_into::<HtmlElement>(), ContactField::Email),
        (message.clone().unchecked_into::<HtmlElement>(), ContactField::Message),
    ] {
        let queue = queue.clone();
        let closure = Closure::wrap(Box::new(move |e: Event| {
            let value = e.target().and_then(|t| {
                t.dyn_ref::<HtmlInputElement>()
                    .map(|i| i.value())
                    .or_else(|| t.dyn_ref::<HtmlTextAreaElement>().map(|a| a.value()))
            });
            if let Some(value) = value {
                queue
                    .borrow_mut()
                    .push_back(UiEvent::EditContact(field.clone(), value));
            }
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let submit = element(document, "button", "submit")?;
    submit.set_text_content(Some("Send"));
    on(&submit, "click", queue, || UiEvent::SubmitContact)?;

    for child in [
        &close,
        &heading,
        name.unchecked_ref::<HtmlElement>(),
        email.unchecked_ref::<HtmlElement>(),
        message.unchecked_ref::<HtmlElement>(),
        &submit,
    ] {
        modal.append_child(child)?;
    }
    root.append_child(&modal)?;
    Ok(ContactModal {
        root: modal,
        name,
        email,
        message,
    })
}

fn element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

fn input(document: &Document, kind: &str, placeholder: &str) -> Result<HtmlInputElement, JsValue> {
    let el = document.create_element("input")?.dyn_into::<HtmlInputElement>()?;
    el.set_type(kind);
    el.set_placeholder(placeholder);
    Ok(el)
}

/// Enqueue `make()` whenever `target` fires `event`.
fn on<F>(target: &HtmlElement, event: &str, queue: &EventQueue, make: F) -> Result<(), JsValue>
where
    F: Fn() -> UiEvent + 'static,
{
    let queue = queue.clone();
    let closure = Closure::wrap(Box::new(move |_: Event| {
        queue.borrow_mut().push_back(make());
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
