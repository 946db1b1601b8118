use crate::config::SiteConfig;
use crate::render::html_escape;

/// Ease-out cubic: fast start, settles into the target.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Counter value at `elapsed_ms` into a `duration_ms` count-up toward
/// `target`. Reduced motion jumps straight to the target.
pub fn counter_value(target: u64, elapsed_ms: u64, duration_ms: u64, reduced_motion: bool) -> u64 {
    if reduced_motion || duration_ms == 0 || elapsed_ms >= duration_ms {
        return target;
    }
    let t = elapsed_ms as f64 / duration_ms as f64;
    (target as f64 * ease_out_cubic(t)).round() as u64
}

/// Entrance delays for a run of `count` cards. All zero under reduced motion.
pub fn stagger_delays(count: usize, step_ms: u64, reduced_motion: bool) -> Vec<u64> {
    (0..count)
        .map(|i| if reduced_motion { 0 } else { i as u64 * step_ms })
        .collect()
}

/// Stats counters section. Under reduced motion the final values are
/// emitted directly and the script leaves them alone.
pub fn counters_section(config: &SiteConfig, reduced_motion: bool) -> String {
    if config.stats.is_empty() {
        return String::new();
    }

    let mut html = String::from("<section id=\"stats\" class=\"stats reveal\">");
    for counter in &config.stats {
        let initial = if reduced_motion { counter.target } else { 0 };
        html.push_str(&format!(
            "<div class=\"stat\">\
<span class=\"stat-value\" data-target=\"{target}\" data-done=\"{done}\">{initial}</span>\
<span class=\"stat-label\">{label}</span>\
</div>",
            target = counter.target,
            done = reduced_motion,
            initial = initial,
            label = html_escape(&counter.label),
        ));
    }
    html.push_str("</section>");
    html
}

/// The shared intersection-observer script: one-shot `.visible` on `.reveal`
/// elements, plus the ease-out counter animation once the stats section
/// enters the viewport. Mirrors the Rust-side math in `counter_value`.
pub fn observer_script(config: &SiteConfig, reduced_motion: bool) -> String {
    format!(
        "<script>\n\
(function(){{\n\
var reduced={reduced}||window.matchMedia('(prefers-reduced-motion: reduce)').matches;\n\
var duration={duration};\n\
function easeOutCubic(t){{return 1-Math.pow(1-t,3);}}\n\
function runCounter(el){{\n\
    if(el.dataset.done==='true')return;\n\
    el.dataset.done='true';\n\
    var target=parseInt(el.dataset.target)||0;\n\
    if(reduced){{el.textContent=target;return;}}\n\
    var start=null;\n\
    function frame(ts){{\n\
        if(start===null)start=ts;\n\
        var t=Math.min((ts-start)/duration,1);\n\
        el.textContent=Math.round(target*easeOutCubic(t));\n\
        if(t<1)requestAnimationFrame(frame);\n\
    }}\n\
    requestAnimationFrame(frame);\n\
}}\n\
function showNow(root){{\n\
    root.querySelectorAll('.reveal').forEach(function(el){{el.classList.add('visible');}});\n\
    root.querySelectorAll('.stat-value').forEach(runCounter);\n\
}}\n\
if(reduced||!('IntersectionObserver' in window)){{\n\
    window.portfoliteObserve=showNow;\n\
    showNow(document);\n\
    return;\n\
}}\n\
var observer=new IntersectionObserver(function(entries){{\n\
    entries.forEach(function(entry){{\n\
        if(!entry.isIntersecting)return;\n\
        entry.target.classList.add('visible');\n\
        entry.target.querySelectorAll('.stat-value').forEach(runCounter);\n\
        if(entry.target.classList.contains('stat-value'))runCounter(entry.target);\n\
        observer.unobserve(entry.target);\n\
    }});\n\
}},{{threshold:0.15}});\n\
function observe(root){{\n\
    root.querySelectorAll('.reveal:not(.visible)').forEach(function(el){{observer.observe(el);}});\n\
}}\n\
window.portfoliteObserve=observe;\n\
observe(document);\n\
}})();\n\
</script>",
        reduced = reduced_motion,
        duration = config.animation.counter_ms,
    )
}
