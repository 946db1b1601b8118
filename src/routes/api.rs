use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use log::{error, info, warn};
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::models::contact::ContactForm;

// ── Contact form ───────────────────────────────────────

#[post("/contact", format = "json", data = "<form>")]
pub fn contact(config: &State<SiteConfig>, form: Json<ContactForm>) -> Json<Value> {
    if !config.contact.enabled {
        return Json(json!({"success": false, "error": "Contact form is disabled"}));
    }

    let form = form.into_inner();

    // Bots get a success response and nothing saved
    if form.is_honeypot() {
        warn!("contact submission dropped (honeypot)");
        return Json(json!({"success": true, "message": "Message sent"}));
    }

    if let Err(e) = form.validate() {
        return Json(json!({"success": false, "error": e}));
    }

    let message = form.into_message();
    match append_to_outbox(&config.contact.outbox, &message) {
        Ok(()) => {
            info!("contact message {} from {}", message.id, message.email);
            Json(json!({"success": true, "message": "Message sent"}))
        }
        Err(e) => {
            error!("could not write contact outbox: {}", e);
            Json(json!({"success": false, "error": "Could not save your message"}))
        }
    }
}

fn append_to_outbox(path: &str, message: &crate::models::contact::ContactMessage) -> Result<(), String> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let line = serde_json::to_string(message).map_err(|e| e.to_string())?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| e.to_string())?;
    writeln!(file, "{}", line).map_err(|e| e.to_string())?;
    Ok(())
}

pub fn routes() -> Vec<rocket::Route> {
    routes![contact]
}
