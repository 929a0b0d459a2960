pub const APP_NAME: &str = "GriotFlow";

pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Placeholder sent in place of the title when the user supplied none.
pub const NO_TITLE_PLACEHOLDER: &str = "(No title provided)";

pub const VIRAL_TITLE_TEMPLATES: &str = r#"
VIRAL_TITLE_TEMPLATES:
1. "She Forced Her Sister to Be Her Maid...You Won't Believe How It Ended!" (Format: [Injustice] ... [Twist/Shock])
2. "WATCH THIS BEFORE YOU SHARE THAT GOOD NEWS WITH OTHERS!" (Format: "WATCH THIS BEFORE" + [Common Action] + [Warning])
3. "She Brought 10 Maids to Her Mother-in-Law's House… BIG MISTAKE!" (Format: [Bold Action] ... "BIG MISTAKE!")
4. "She Named Her Baby 'Aeroplane' — But the Reason Will Shock You!" (Format: [Strange Decision] — [Curiosity Hook])
5. "Teacher ATE Her Students' Food Every Day… Until She Met Her MATCH!" (Format: [Villain Act] ... "Until She Met Her MATCH!")
6. "IF YOU EVER MEET A MAN LIKE THIS, RUN!" (Format: "IF YOU EVER" + [Scenario] + [Extreme Command])
"#;

pub const SYSTEM_INSTRUCTION: &str = r#"
You are a world-class YouTube SEO Strategist and Thumbnails Expert, specifically tuned for the "African Folktales", "Storytelling", and "Mythology" niche.
Your goal is to maximize Click-Through Rate (CTR) and Average View Duration (AVD).

**COMPETITOR BENCHMARK (Nne's Folktales):**
You have analyzed the top-performing channel "Nne's Folktales". Their content goes viral by following these strict patterns:
1.  **The "Warning" Hook**: Starts with "WATCH THIS BEFORE..." or "IF YOU EVER...". Caps lock is used for urgency.
2.  **The "Karma" Arc**: A villain does something outrageous until they "MEET THEIR MATCH".
3.  **The "Big Mistake"**: A protagonist makes a choice labeled immediately as a "BIG MISTAKE!".
4.  **Visuals**: Thumbnails often feature high-contrast facial expressions (Shock, Crying, Evil Smirk) and split compositions.
5.  **Keywords**: "SHOCK YOU", "BITTER LESSON", "RUN!", "BIG MISTAKE", "HUMBLE YOU".

**Your Task:**
Analyze the user's input and provide feedback that pushes them towards this viral style while maintaining their unique angle.

**Scoring Guidelines:**
- 90+: Viral potential (Perfectly matches patterns like "Big Mistake" or "Warning").
- <60: Weak, generic (e.g., "The story of the tortoise").

**Title Suggestions:**
- Must provide a "Unique Angle" but use the "Winning Formula".
- Provide a metric score for each suggestion.
"#;

pub const CHANNEL_SYSTEM_INSTRUCTION: &str = r#"
You are a YouTube Channel Analyst. The user will provide a channel name (or niche).
Your goal is to simulate a "competitor deep dive" based on your knowledge of viral channels in that niche (especially African Folktales, Animation, Storytelling).

Identify:
1. The "Winning Formula": What specific tropes make their top videos pop?
2. "Most Rewatched Patterns": What moments in videos usually have high retention? (e.g. "The Reveal", "The Karma Moment").
3. "What to Create Next": Suggest 3 concrete video ideas that satisfy current audience demand but have low supply (Content Gaps).

**IMPORTANT**: When suggesting "What to Create Next", strongly prioritize the "Viral Title Templates" (e.g. "WATCH THIS BEFORE...", "BIG MISTAKE!") found in top competitors like Nne's Folktales. The suggestions must look like they could go viral immediately.
"#;

/// User-turn text for a content analysis. The title is quoted literally;
/// an empty title becomes the fixed placeholder so the model still sees a
/// well-formed request.
pub fn content_prompt(title: &str, has_thumbnail: bool) -> String {
    let shown_title = if title.is_empty() {
        NO_TITLE_PLACEHOLDER
    } else {
        title
    };
    let thumbnail_note = if has_thumbnail {
        "Thumbnail: (Attached Image)."
    } else {
        "Thumbnail: (No thumbnail provided)."
    };
    format!(
        "Analyze this YouTube video concept.\n\
         Title: \"{shown_title}\".\n\
         {thumbnail_note}\n\n\
         Provide actionable SEO and CTR advice specifically for an African Folktales or Storytelling channel."
    )
}

/// User-turn text for a channel deep dive, with the viral template block
/// embedded as few-shot grounding.
pub fn channel_prompt(channel_name: &str) -> String {
    format!(
        "Analyze the channel \"{channel_name}\".\n\n\
         Use these proven viral templates as a benchmark for your \"What to Create Next\" suggestions:\n\
         {VIRAL_TITLE_TEMPLATES}\n\
         Identify their winning formula, most rewatched segments, and suggest 3 high-viral-potential ideas."
    )
}
