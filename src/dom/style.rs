// Companion stylesheet. Fade durations are formatted from the same values that
// drive the timers so the animating flag and the CSS never drift apart.

pub(crate) const STYLE_ID: &str = "mc-style";

pub(crate) fn stylesheet(transition_ms: u32, reveal_delay_ms: u32) -> String {
    format!(
        r#"
.App {{ min-height:100vh; display:flex; align-items:center; justify-content:center; background:#f6f1ea; font-family:Georgia, 'Times New Roman', serif; color:#2b2420; }}
.sr-only {{ position:absolute; width:1px; height:1px; padding:0; margin:-1px; overflow:hidden; clip:rect(0,0,0,0); border:0; }}
.prompt-card {{ text-align:center; padding:32px 40px; opacity:1; transition:opacity {reveal}ms ease; }}
.prompt-card.fade-out {{ opacity:0; pointer-events:none; }}
.prompt-question {{ font-weight:normal; font-size:28px; margin:0 0 24px; }}
.prompt-line {{ display:block; }}
.prompt-input {{ font:inherit; font-size:20px; padding:10px 14px; border:1px solid #b9aa98; border-radius:8px; background:#fffdf9; width:260px; text-align:center; }}
.carousel {{ display:flex; flex-direction:column; align-items:center; gap:18px; opacity:0; transition:opacity {reveal}ms ease; }}
.carousel.show {{ opacity:1; }}
.carousel[hidden] {{ display:none; }}
.carousel-track {{ display:flex; align-items:center; gap:24px; }}
.carousel-thumb {{ width:96px; height:96px; object-fit:cover; border-radius:8px; opacity:0.6; cursor:pointer; transition:opacity 200ms ease; }}
.carousel-thumb:hover {{ opacity:0.9; }}
.carousel-stage {{ position:relative; width:min(70vw, 720px); height:min(70vh, 540px); }}
.slide-image {{ position:absolute; inset:0; width:100%; height:100%; object-fit:contain; }}
.slide-image.shown {{ opacity:1; }}
.slide-image.fade-in {{ animation:mc-fade-in {transition}ms ease forwards; }}
.slide-image.fade-out {{ animation:mc-fade-out {transition}ms ease forwards; }}
.carousel-controls {{ display:flex; gap:12px; }}
.nav-btn {{ font-size:18px; padding:6px 16px; border:1px solid #b9aa98; border-radius:999px; background:#fffdf9; cursor:pointer; }}
@keyframes mc-fade-in {{ from {{ opacity:0; }} to {{ opacity:1; }} }}
@keyframes mc-fade-out {{ from {{ opacity:1; }} to {{ opacity:0; }} }}
"#,
        transition = transition_ms,
        reveal = reveal_delay_ms,
    )
}
