use crate::config::Intro;
use crate::render::html_escape;

pub const SEEN_COOKIE: &str = "intro_seen";
pub const SKIP_COOKIE: &str = "intro_skip";

/// Everything the skip decision depends on, gathered from the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntroPrefs {
    /// `?skip` query parameter present.
    pub skip_param: bool,
    /// Session cookie says the overlay already ran.
    pub seen_this_session: bool,
    /// Unix timestamp of an explicit skip, if any.
    pub skipped_at: Option<i64>,
    pub reduced_motion: bool,
}

/// Whether to serve the intro overlay. An explicit skip is honored for
/// `skip_hours`; after that the overlay comes back.
pub fn should_show(config: &Intro, prefs: &IntroPrefs, now_unix: i64) -> bool {
    if !config.enabled || prefs.skip_param || prefs.seen_this_session || prefs.reduced_motion {
        return false;
    }
    if let Some(skipped_at) = prefs.skipped_at {
        let expiry = skipped_at + config.skip_hours * 3600;
        if now_unix < expiry {
            return false;
        }
    }
    true
}

/// Parse the skip cookie's stored timestamp. Garbage values count as unset.
pub fn parse_skip_cookie(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

/// The overlay markup and its timing script. The script guarantees a
/// minimum display time and a maximum fallback even if the page load event
/// never fires; skip (button or escape key) short-circuits the sequence and
/// records the preference. Completion reveals the hero elements in a
/// staggered sequence and dispatches `intro:complete` / `welcome:complete`.
pub fn overlay(config: &Intro, site_name: &str, stagger_ms: u64) -> String {
    format!(
        "<div id=\"intro-overlay\" class=\"intro-overlay\" role=\"presentation\">\n\
<div class=\"intro-inner\"><span class=\"intro-brand\">{name}</span><span class=\"intro-spinner\"></span></div>\n\
<button id=\"intro-skip\" class=\"intro-skip\">Skip</button>\n\
</div>\n\
<script>\n\
(function(){{\n\
var overlay=document.getElementById('intro-overlay');\n\
if(!overlay)return;\n\
var minMs={min_ms},maxMs={max_ms},skipHours={skip_hours},stagger={stagger};\n\
var shownAt=Date.now(),done=false;\n\
document.body.classList.add('intro-active');\n\
function revealHero(){{\n\
    var items=document.querySelectorAll('[data-hero]');\n\
    items.forEach(function(el,i){{\n\
        setTimeout(function(){{\n\
            el.classList.add('visible');\n\
            if(i===items.length-1)document.dispatchEvent(new CustomEvent('welcome:complete'));\n\
        }},i*stagger);\n\
    }});\n\
    if(!items.length)document.dispatchEvent(new CustomEvent('welcome:complete'));\n\
}}\n\
function finish(skipped){{\n\
    if(done)return;\n\
    done=true;\n\
    if(skipped){{\n\
        var ts=Math.floor(Date.now()/1000);\n\
        document.cookie='{skip_cookie}='+ts+';path=/;max-age='+(skipHours*3600);\n\
    }}\n\
    overlay.classList.add('intro-out');\n\
    setTimeout(function(){{\n\
        if(overlay.parentNode)overlay.parentNode.removeChild(overlay);\n\
        document.body.classList.remove('intro-active');\n\
        document.dispatchEvent(new CustomEvent('intro:complete'));\n\
        revealHero();\n\
    }},300);\n\
}}\n\
function finishAfterMin(){{\n\
    var wait=Math.max(0,minMs-(Date.now()-shownAt));\n\
    setTimeout(function(){{finish(false)}},wait);\n\
}}\n\
if(document.readyState==='complete')finishAfterMin();\n\
else window.addEventListener('load',finishAfterMin);\n\
setTimeout(function(){{finish(false)}},maxMs);\n\
document.getElementById('intro-skip').addEventListener('click',function(){{finish(true)}});\n\
document.addEventListener('keydown',function(e){{if(e.key==='Escape')finish(true)}});\n\
}})();\n\
</script>",
        name = html_escape(site_name),
        min_ms = config.min_ms,
        max_ms = config.max_ms,
        skip_hours = config.skip_hours,
        stagger = stagger_ms,
        skip_cookie = SKIP_COOKIE,
    )
}
