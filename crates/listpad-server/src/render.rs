//! HTML for the two pages.
//!
//! Pages are assembled from `const` templates with `{{PLACEHOLDER}}`
//! substitution. Every user-supplied value goes through `html_escape`
//! before it is spliced in.
//!
//! The overlay is always present in the form page. It is shown server-side
//! when the view's `show_confirmation_sequence` flag is set (a repeated
//! POST while the first one is still running gets this page), and client-side
//! the moment a submit passes the same checks the server runs, so the
//! staged sequence plays while the POST is in flight. Stage timing is
//! carried by CSS custom properties (`--on`, `--off`) computed from
//! [`ProgressSequence::schedule`].

use std::fmt::Write as _;
use std::time::Duration;

use html_escape::{encode_double_quoted_attribute, encode_text};
use uuid::Uuid;

use listpad_core::confirmation::ConfirmationView;
use listpad_core::form::SubmissionForm;
use listpad_core::listing::Field;
use listpad_core::notify::Notification;
use listpad_core::progress::{ProgressSequence, StageStatus};
use listpad_core::route::Route;
use listpad_core::validate::{ABOUT_MIN_CHARS, CONTACT_NUMBER_PATTERN, WEBSITE_PATTERN};

/// Render the listing form for one view.
///
/// `notifications` are the toasts to hand to the browser with this page.
#[must_use]
pub fn form_page(view_id: Uuid, form: &SubmissionForm, notifications: &[Notification]) -> String {
    let flow = form.flow();

    let mut fields = String::with_capacity(4096);
    for field in Field::ALL {
        let value = form.values().get(field);
        let error = form.errors().get(field).map(|e| e.to_string());
        field_block(&mut fields, field, value, error.as_deref());
    }

    let (disabled, button_label) = if flow.is_submitting {
        (" disabled", SAVING_LABEL)
    } else {
        ("", SUBMIT_LABEL)
    };

    // A mounted overlay resumes where its clock is; a hidden one starts
    // from zero when the browser mounts it.
    let overlay = match form.progress() {
        Some(progress) if flow.show_confirmation_sequence => {
            overlay(&progress.schedule(), false)
        }
        _ => overlay(&ProgressSequence::schedule_at(Duration::ZERO), true),
    };

    let body = FORM_BODY
        .replace("{{TOASTS}}", &toasts(notifications))
        .replace("{{OVERLAY}}", &overlay)
        .replace("{{ACTION}}", Route::SubmissionForm.path())
        .replace("{{VIEW_ID}}", &view_id.to_string())
        .replace("{{FIELDS}}", &fields)
        .replace("{{DISABLED}}", disabled)
        .replace("{{BUTTON_LABEL}}", button_label)
        .replace("{{SCRIPT}}", &submit_script());

    page("Submit Your Listing", &body)
}

/// Render the static confirmation page.
#[must_use]
pub fn thank_you_page() -> String {
    let view = ConfirmationView;
    let body = THANK_YOU_BODY
        .replace("{{TITLE}}", ConfirmationView::TITLE)
        .replace("{{MESSAGE}}", &encode_text(ConfirmationView::MESSAGE))
        .replace("{{ACTION_HREF}}", view.submit_another().path())
        .replace("{{ACTION_LABEL}}", ConfirmationView::ACTION_LABEL);
    page(ConfirmationView::TITLE, &body)
}

const SUBMIT_LABEL: &str = "Submit";
const SAVING_LABEL: &str = "Saving...";

fn page(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(PAGE_HEAD.len() + body.len() + 64);
    html.push_str(&PAGE_HEAD.replace("{{TITLE}}", &encode_text(title)));
    html.push_str(body);
    html.push_str("</body></html>\n");
    html
}

fn field_block(out: &mut String, field: Field, value: &str, error: Option<&str>) {
    let name = field.as_str();
    let label = field.label();
    let value_attr = encode_double_quoted_attribute(value);

    let _ = write!(out, r#"<div class="field"><label for="{name}">{label}</label>"#);
    match field {
        Field::About => {
            let _ = write!(
                out,
                r#"<textarea id="{name}" name="{name}" placeholder="{placeholder}">{text}</textarea>"#,
                placeholder = placeholder(field),
                text = encode_text(value),
            );
        }
        _ => {
            let _ = write!(
                out,
                r#"<input id="{name}" name="{name}" type="{kind}" placeholder="{placeholder}" value="{value_attr}"/>"#,
                kind = input_type(field),
                placeholder = placeholder(field),
            );
        }
    }
    if let Some(message) = error {
        let _ = write!(out, r#"<p class="field-error">{}</p>"#, encode_text(message));
    }
    out.push_str("</div>");
}

const fn input_type(field: Field) -> &'static str {
    match field {
        Field::ContactNumber => "tel",
        _ => "text",
    }
}

const fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "Your name or company name",
        Field::Website => "https://your-website.com",
        Field::About => "Tell us about your product or service",
        Field::ContactNumber => "Enter your contact number",
    }
}

fn overlay(schedule: &[(&'static str, StageStatus, Duration)], hidden: bool) -> String {
    let mut stages = String::with_capacity(1024);
    for (index, (text, status, starts_in)) in schedule.iter().enumerate() {
        let next = schedule.get(index + 1).map(|(_, _, d)| *d);
        let mut style = format!("--on:{}ms", millis(*starts_in));
        if let Some(off) = next {
            let _ = write!(style, ";--off:{}ms", millis(off));
        }
        let check = if next.is_some() {
            r#"<span class="check"> ✓</span>"#
        } else {
            ""
        };
        let _ = write!(
            stages,
            r#"<p class="stage {status}" style="{style}">{text}<span class="dots">...</span>{check}</p>"#,
            status = status.as_str(),
            text = encode_text(text),
        );
    }

    let hidden_attr = if hidden { " hidden" } else { "" };
    format!(
        r#"<div id="overlay" class="overlay"{hidden_attr}><div class="overlay-inner"><div class="spinner"></div><div class="stages">{stages}</div></div></div>"#
    )
}

fn toasts(notifications: &[Notification]) -> String {
    let mut out = String::new();
    for note in notifications {
        let _ = write!(
            out,
            r#"<div class="toast toast-{level}" role="alert" data-id="{id}" style="--ttl:{ttl}ms">{message}<button type="button" class="toast-close" aria-label="Dismiss" onclick="this.parentElement.remove()">&times;</button></div>"#,
            level = note.level.as_str(),
            id = note.id,
            ttl = millis(note.remaining()),
            message = encode_text(&note.message),
        );
    }
    out
}

fn submit_script() -> String {
    // JSON string literals are valid JavaScript string literals.
    let website = serde_json::to_string(WEBSITE_PATTERN).unwrap_or_default();
    let phone = serde_json::to_string(CONTACT_NUMBER_PATTERN).unwrap_or_default();
    SUBMIT_SCRIPT
        .replace("{{WEBSITE_PATTERN}}", &website)
        .replace("{{CONTACT_PATTERN}}", &phone)
        .replace("{{ABOUT_MIN}}", &ABOUT_MIN_CHARS.to_string())
        .replace("{{SAVING_LABEL}}", SAVING_LABEL)
}

fn millis(d: Duration) -> u128 {
    d.as_millis()
}

/// Document head and shared styles.
const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>{{TITLE}}</title>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
body{min-height:100vh;display:flex;align-items:center;justify-content:center;padding:16px;background:#000;color:#fff;font-family:-apple-system,'Segoe UI',sans-serif;line-height:1.5;
background-image:radial-gradient(1px 1px at 20% 30%,#fff8,transparent),radial-gradient(1px 1px at 70% 80%,#fff6,transparent),radial-gradient(2px 2px at 40% 60%,#fff4,transparent),radial-gradient(1px 1px at 85% 15%,#fff8,transparent)}
.card{width:100%;max-width:28rem;background:#18181b;border:1px solid #27272a;border-radius:12px;box-shadow:0 25px 50px rgba(59,130,246,.1);padding:24px}
.title{font-size:24px;font-weight:700;margin-bottom:24px;background:linear-gradient(90deg,#60a5fa,#2563eb);-webkit-background-clip:text;background-clip:text;color:transparent}
.field{margin-bottom:20px}
.field label{display:block;font-size:14px;color:#d4d4d8;margin-bottom:6px}
.field input,.field textarea{width:100%;padding:8px 12px;background:#27272a;border:1px solid #3f3f46;border-radius:6px;color:#fff;font:inherit}
.field textarea{min-height:8rem}
.field input:focus,.field textarea:focus{outline:none;border-color:#3b82f6}
.field-error{font-size:14px;color:#ef4444;margin-top:4px}
.btn{display:inline-block;width:100%;padding:8px 16px;border:none;border-radius:6px;background:linear-gradient(90deg,#3b82f6,#2563eb);color:#fff;font:inherit;font-weight:500;text-align:center;text-decoration:none;cursor:pointer;box-shadow:0 10px 15px rgba(59,130,246,.25)}
.btn:disabled{opacity:.6;cursor:not-allowed}
.toasts{position:fixed;top:16px;right:16px;z-index:60;display:flex;flex-direction:column;gap:8px}
.toast{display:flex;align-items:center;gap:12px;padding:12px 16px;border-radius:8px;background:#27272a;border:1px solid #3f3f46;animation:toast-out .3s ease var(--ttl) forwards}
.toast-error{border-color:#ef4444}
.toast-close{background:none;border:none;color:#a1a1aa;font-size:18px;cursor:pointer}
@keyframes toast-out{to{opacity:0;visibility:hidden}}
.overlay{position:fixed;inset:0;z-index:50;display:flex;align-items:center;justify-content:center;background:rgba(0,0,0,.8)}
.overlay[hidden]{display:none}
.overlay-inner{text-align:center}
.spinner{width:96px;height:96px;margin:0 auto 32px;border:8px solid #3b82f6;border-top-color:transparent;border-radius:50%;animation:spin 1s linear infinite}
@keyframes spin{to{transform:rotate(360deg)}}
.stage{font-size:20px;font-weight:500;margin:16px 0;color:#6b7280;opacity:.3}
.stage .dots,.stage .check{opacity:0}
.stage.done{color:#22c55e;opacity:1}
.stage.done .check{opacity:1}
.stage:not(.done){animation:stage-on 0s linear var(--on) forwards}
.stage:not(.done)[style*="--off"]{animation:stage-on 0s linear var(--on) forwards,stage-off 0s linear var(--off) forwards}
.stage:not(.done) .dots{animation:dots-on 0s linear var(--on) forwards}
.stage:not(.done)[style*="--off"] .dots{animation:dots-on 0s linear var(--on) forwards,dots-off 0s linear var(--off) forwards}
.stage:not(.done) .check{animation:check-on 0s linear var(--off) forwards}
@keyframes stage-on{to{color:#60a5fa;opacity:1}}
@keyframes stage-off{to{color:#22c55e;opacity:1}}
@keyframes dots-on{to{opacity:1}}
@keyframes dots-off{to{opacity:0}}
@keyframes check-on{to{opacity:1}}
.center{text-align:center;max-width:42rem}
.badge{width:80px;height:80px;margin:0 auto 32px;border-radius:50%;background:linear-gradient(90deg,#3b82f6,#2563eb);display:flex;align-items:center;justify-content:center}
.badge svg{width:40px;height:40px}
.lead{font-size:18px;color:#d1d5db;margin-bottom:32px}
.center .title{font-size:36px}
.center .btn{width:auto;padding:8px 24px}
</style></head>
<body>
"##;

/// Body of the form page.
const FORM_BODY: &str = r##"<div class="toasts">{{TOASTS}}</div>
{{OVERLAY}}
<div class="card">
  <h1 class="title">Submit Your Listing</h1>
  <form id="listing-form" method="post" action="{{ACTION}}" novalidate>
    <input type="hidden" name="view_id" value="{{VIEW_ID}}"/>
    {{FIELDS}}
    <button type="submit" class="btn"{{DISABLED}}>{{BUTTON_LABEL}}</button>
  </form>
</div>
<script>{{SCRIPT}}</script>
"##;

/// Client-side mirror of the server checks. It only decides whether to
/// mount the overlay; the server re-validates every submission.
const SUBMIT_SCRIPT: &str = r##"
(function(){
  var form=document.getElementById('listing-form');
  var website=new RegExp({{WEBSITE_PATTERN}});
  var phone=new RegExp({{CONTACT_PATTERN}});
  function val(n){return form.querySelector('[name="'+n+'"]').value;}
  form.addEventListener('submit',function(e){
    var button=form.querySelector('button[type=submit]');
    if(button.disabled){e.preventDefault();return;}
    var ok=val('name')!==''&&website.test(val('website'))&&Array.from(val('about')).length>={{ABOUT_MIN}}&&phone.test(val('contactNumber'));
    if(!ok){return;}
    button.disabled=true;
    button.textContent='{{SAVING_LABEL}}';
    document.getElementById('overlay').hidden=false;
  });
})();
"##;

/// Body of the thank-you page.
const THANK_YOU_BODY: &str = r##"<div class="center">
  <div class="badge"><svg fill="none" stroke="#fff" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 13l4 4L19 7"/></svg></div>
  <h1 class="title">{{TITLE}}</h1>
  <p class="lead">{{MESSAGE}}</p>
  <a class="btn" href="{{ACTION_HREF}}">{{ACTION_LABEL}}</a>
</div>
"##;
