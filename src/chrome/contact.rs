use crate::config::SiteConfig;
use crate::render::html_escape;

/// Contact section with its submit script, modeled on the same
/// fetch-JSON-envelope shape the API route answers with.
pub fn section(config: &SiteConfig) -> String {
    if !config.contact.enabled {
        return String::new();
    }
    format!(
        "<section id=\"contact\" class=\"contact reveal\">\n\
<h2>Get in touch</h2>\n\
<form id=\"contact-form\">\n\
    <input type=\"text\" name=\"name\" placeholder=\"Name\" required>\n\
    <input type=\"email\" name=\"email\" placeholder=\"Email\" required>\n\
    <input type=\"text\" name=\"subject\" placeholder=\"Subject\">\n\
    <textarea name=\"message\" placeholder=\"Your message…\" required></textarea>\n\
    <div style=\"display:none\"><input type=\"text\" name=\"website\" tabindex=\"-1\" autocomplete=\"off\"></div>\n\
    <button type=\"submit\">Send</button>\n\
    <p id=\"contact-msg\" style=\"display:none\"></p>\n\
</form>\n\
</section>\n\
<script>\n\
(function(){{\n\
var f=document.getElementById('contact-form');\n\
if(!f)return;\n\
f.addEventListener('submit',function(e){{\n\
    e.preventDefault();\n\
    var btn=f.querySelector('button[type=submit]');\n\
    btn.disabled=true;btn.textContent='Sending…';\n\
    var msg=document.getElementById('contact-msg');\n\
    msg.style.display='none';\n\
    var data={{\n\
        name:f.querySelector('[name=name]').value,\n\
        email:f.querySelector('[name=email]').value,\n\
        subject:f.querySelector('[name=subject]').value,\n\
        message:f.querySelector('[name=message]').value,\n\
        honeypot:f.querySelector('[name=website]').value||null\n\
    }};\n\
    fetch('/api/contact',{{method:'POST',headers:{{'Content-Type':'application/json'}},body:JSON.stringify(data)}})\n\
    .then(function(r){{return r.json()}})\n\
    .then(function(j){{\n\
        msg.style.display='';\n\
        if(j.success){{msg.style.color='green';msg.textContent=j.message||'Message sent';f.reset();}}\n\
        else{{msg.style.color='red';msg.textContent=j.error||'Failed';}}\n\
    }})\n\
    .catch(function(){{msg.style.display='';msg.style.color='red';msg.textContent='Network error';}})\n\
    .finally(function(){{btn.disabled=false;btn.textContent='Send';}});\n\
}});\n\
}})();\n\
</script>",
    )
}

/// Author byline for the hero when one is configured.
pub fn author_line(config: &SiteConfig) -> String {
    if config.site.author.is_empty() {
        String::new()
    } else {
        format!("<p class=\"author-line\">{}</p>", html_escape(&config.site.author))
    }
}
