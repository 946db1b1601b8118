use crate::config::SiteConfig;
use crate::render::html_escape;

const NAV_LINKS: &[(&str, &str)] = &[("/", "Home"), ("/blog", "Blog")];

/// Does a nav link own the current request path?
/// `/post` belongs to the blog section; `/` matches exactly.
pub fn is_active(link: &str, path: &str) -> bool {
    match link {
        "/" => path == "/",
        "/blog" => path.starts_with("/blog") || path.starts_with("/post"),
        _ => path == link,
    }
}

/// Navigation bar with server-side active-link highlight, mobile menu
/// markup, and the script handling scrolled state, menu dismissal
/// (overlay / escape / link click / resize), and smooth anchor scroll.
pub fn build(config: &SiteConfig, active_path: &str) -> String {
    let links: String = NAV_LINKS
        .iter()
        .map(|(href, label)| {
            let class = if is_active(href, active_path) {
                "nav-link active"
            } else {
                "nav-link"
            };
            format!("<a href=\"{}\" class=\"{}\">{}</a>", href, class, label)
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        "<header id=\"navbar\" class=\"navbar\">\n\
<a href=\"/\" class=\"nav-brand\">{name}</a>\n\
<nav id=\"nav-menu\" class=\"nav-menu\">{links}</nav>\n\
<button id=\"nav-toggle\" class=\"nav-toggle\" aria-label=\"Menu\" aria-expanded=\"false\"><span></span><span></span><span></span></button>\n\
</header>\n\
<div id=\"nav-overlay\" class=\"nav-overlay\"></div>\n\
<script>\n\
(function(){{\n\
var nav=document.getElementById('navbar');\n\
var toggle=document.getElementById('nav-toggle');\n\
var menu=document.getElementById('nav-menu');\n\
var overlay=document.getElementById('nav-overlay');\n\
if(!nav)return;\n\
window.addEventListener('scroll',function(){{\n\
    nav.classList.toggle('scrolled',window.scrollY>50);\n\
}});\n\
function closeMenu(){{\n\
    menu.classList.remove('open');overlay.classList.remove('open');\n\
    toggle.setAttribute('aria-expanded','false');\n\
}}\n\
if(toggle){{\n\
    toggle.addEventListener('click',function(){{\n\
        var open=menu.classList.toggle('open');\n\
        overlay.classList.toggle('open',open);\n\
        toggle.setAttribute('aria-expanded',open?'true':'false');\n\
    }});\n\
    overlay.addEventListener('click',closeMenu);\n\
    document.addEventListener('keydown',function(e){{if(e.key==='Escape')closeMenu();}});\n\
    menu.querySelectorAll('a').forEach(function(a){{a.addEventListener('click',closeMenu);}});\n\
    window.addEventListener('resize',function(){{if(window.innerWidth>768)closeMenu();}});\n\
}}\n\
document.querySelectorAll('a[href^=\"#\"]').forEach(function(a){{\n\
    a.addEventListener('click',function(e){{\n\
        var target=document.querySelector(a.getAttribute('href'));\n\
        if(!target)return;\n\
        e.preventDefault();\n\
        var top=target.getBoundingClientRect().top+window.scrollY-nav.offsetHeight;\n\
        window.scrollTo({{top:top,behavior:'smooth'}});\n\
        history.pushState(null,'',a.getAttribute('href'));\n\
    }});\n\
}});\n\
}})();\n\
</script>",
        name = html_escape(&config.site.name),
        links = links,
    )
}

/// Floating back-to-top button, shown past a scroll threshold.
pub fn back_to_top() -> String {
    r#"<button id="back-to-top" aria-label="Back to top" style="display:none;position:fixed;bottom:24px;right:24px;z-index:999;width:40px;height:40px;border-radius:50%;border:1px solid #ddd;background:rgba(255,255,255,0.9);cursor:pointer;font-size:18px;line-height:1;box-shadow:0 2px 8px rgba(0,0,0,0.1);transition:opacity 0.3s">↑</button>
<script>
(function(){
var btn=document.getElementById('back-to-top');
if(!btn)return;
window.addEventListener('scroll',function(){btn.style.display=window.scrollY>300?'block':'none';});
btn.addEventListener('click',function(){window.scrollTo({top:0,behavior:'smooth'});});
})();
</script>"#
        .to_string()
}
