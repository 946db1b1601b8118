#[macro_use]
extern crate rocket;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::fs::FileServer;
use rocket::http::Header;
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};

mod boot;
mod chrome;
mod config;
mod feed;
mod listing;
mod models;
mod render;
mod routes;
mod rss;
mod seo;
mod tests;

use config::SiteConfig;

/// Asks browsers to send the reduced-motion client hint so animation can be
/// collapsed server-side for users who prefer it.
pub struct AcceptClientHints;

#[rocket::async_trait]
impl Fairing for AcceptClientHints {
    fn info(&self) -> Info {
        Info {
            name: "Accept-CH Header",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _req: &'r rocket::Request<'_>, res: &mut rocket::Response<'r>) {
        res.set_header(Header::new("Accept-CH", "Sec-CH-Prefers-Reduced-Motion"));
        res.set_header(Header::new(
            "Critical-CH",
            "Sec-CH-Prefers-Reduced-Motion",
        ));
    }
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Assemble the rocket. Factored out of the launch fn so route tests can
/// drive it with their own config.
pub fn build(config: SiteConfig) -> Rocket<Build> {
    rocket::build()
        .manage(config)
        .attach(AcceptClientHints)
        .mount("/static", FileServer::from("site/static"))
        .mount("/data", FileServer::from("site/data"))
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = SiteConfig::load();

    // Boot check — verify/create directories, validate critical files
    boot::run(&config);

    build(config)
}
