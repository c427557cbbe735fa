// Prompt catalog - canned edit instructions and parameterised tools
//
// Nothing here carries behaviour; the orchestrator only ever sees the final text.

use serde::Serialize;

/// Instruction run once, right after upload
pub const AUTO_TRANSFORM_INSTRUCTION: &str = "Transform this photo into a professional headshot. Perform automatic adjustments for lighting, color correction, natural skin smoothing, and sharpen facial features for a high-quality, polished look. Do not crop the image.";
pub const AUTO_TRANSFORM_PROGRESS: &str = "Performing Snazzy Auto-Transform...";

/// Appended to every instruction while a style reference is attached
pub const STYLE_REFERENCE_CLAUSE: &str = " The first image provided is a style reference. Heavily reference it for overall mood, color grading, lighting, and texture when performing the requested edit on the second image.";

pub const APPLY_STYLE_INSTRUCTION: &str = "Re-imagine the headshot to match the overall style, mood, and color palette of the provided reference image. Adapt the lighting and texture to be consistent with the reference, without changing the subject's identity.";
pub const APPLY_STYLE_PROGRESS: &str = "Applying style reference...";

pub const OUTPAINT_INSTRUCTION: &str = "This is an image with transparent areas that need to be filled. Perform an outpainting task to seamlessly extend the existing background and scene into the transparent regions. The final result should look natural, photorealistic, and have no transparency.";
pub const OUTPAINT_PROGRESS: &str = "Generating new frame with AI...";

pub const CUSTOM_PROGRESS: &str = "Applying custom instructions...";

/// Colour temperature range offered by the light tool, in Kelvin
pub const KELVIN_MIN: u32 = 3200;
pub const KELVIN_MAX: u32 = 7500;
pub const KELVIN_DEFAULT: u32 = 5500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Headshot,
    Wardrobe,
    Background,
    Face,
    Lighting,
    Pose,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Headshot,
        Category::Wardrobe,
        Category::Background,
        Category::Face,
        Category::Lighting,
        Category::Pose,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Headshot => "Headshot Styles",
            Category::Wardrobe => "Wardrobe",
            Category::Background => "Background",
            Category::Face => "Face Refine",
            Category::Lighting => "Lighting",
            Category::Pose => "Pose & Expression",
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub instruction: &'static str,
    pub progress: &'static str,
}

const fn preset(
    id: &'static str,
    label: &'static str,
    category: Category,
    instruction: &'static str,
    progress: &'static str,
) -> Preset {
    Preset {
        id,
        label,
        category,
        instruction,
        progress,
    }
}

pub static PRESETS: &[Preset] = &[
    preset(
        "corporate-leader",
        "Corporate Leader",
        Category::Headshot,
        "Transform this image into a powerful corporate headshot. Change the person's outfit to a sharp, professional dark business suit. Replace the background with a modern, high-end office with large windows, subtly blurred. Adjust the lighting to be confident and professional, with a clear key light. The final image should feel polished and authoritative. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Corporate Leader preset...",
    ),
    preset(
        "creative-professional",
        "Creative Professional",
        Category::Headshot,
        "Transform this into a headshot for a creative professional. Change the outfit to a stylish dark turtleneck sweater. Replace the background with a rustic, textured brick wall. The lighting should be slightly dramatic, like Rembrandt or loop lighting, to add character. The final image should feel artistic and confident. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Creative Professional preset...",
    ),
    preset(
        "tech-startup",
        "Tech Startup",
        Category::Headshot,
        "Transform this into a friendly and modern tech startup headshot. Change the outfit to a smart casual polo shirt. Replace the background with a bright, open-plan office or a colorful wall, softly blurred. Use bright, natural-looking lighting. The final image should feel approachable and innovative. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Tech Startup preset...",
    ),
    preset(
        "academic-author",
        "Academic / Author",
        Category::Headshot,
        "Transform this into a headshot for an academic or author. Change the outfit to a smart sweater or tweed blazer. Replace the background with a warm, aesthetically pleasing bookshelf or library, softly blurred. The lighting should be warm and soft. The final image should feel intelligent and thoughtful. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Academic / Author preset...",
    ),
    preset(
        "healthcare-pro",
        "Healthcare Pro",
        Category::Headshot,
        "Transform this into a professional headshot for a healthcare worker. Change the outfit to clean, simple scrubs (e.g., blue or green) or a white medical coat. Replace the background with a clean, minimalist, out-of-focus medical office or clinic setting. Lighting should be bright, clean, and trustworthy. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Healthcare Pro preset...",
    ),
    preset(
        "outdoor-natural",
        "Outdoor Natural",
        Category::Headshot,
        "Transform this into a natural-light outdoor headshot. Change the outfit to a casual jacket or outdoor wear. Replace the background with a beautiful, softly blurred natural setting like a park or forest. The lighting should mimic natural sunlight, creating a warm and approachable feel. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Outdoor Natural preset...",
    ),
    preset(
        "studio-classic",
        "Studio Classic (B&W)",
        Category::Headshot,
        "Transform this into a timeless, classic black and white studio headshot. The outfit should be simple and dark. The background should be a solid, textured studio gray. Convert the entire image to a rich, high-contrast black and white with dramatic lighting that sculpts the face. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Studio Classic (B&W) preset...",
    ),
    preset(
        "friendly-approachable",
        "Friendly & Approachable",
        Category::Headshot,
        "Transform this into a friendly and approachable headshot. Change the outfit to a casual button-down shirt or a simple blouse. Replace the background with the warm, inviting, and softly blurred interior of a modern coffee shop. The lighting should be soft and flattering. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Friendly & Approachable preset...",
    ),
    preset(
        "minimalist-modern",
        "Minimalist Modern",
        Category::Headshot,
        "Transform this into a modern, minimalist headshot. Change the outfit to a simple, elegant top with clean lines (e.g., a solid color blouse or shirt). Replace the background with a clean, bright, minimalist architectural space (e.g., a white wall with an interesting shadow line), softly blurred. Use high-key, airy lighting. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Minimalist Modern preset...",
    ),
    preset(
        "glamour-beauty",
        "Glamour & Beauty",
        Category::Headshot,
        "Transform this into a glamorous beauty headshot. The outfit should be elegant. The background should be dark and moody. The lighting should be flattering and dramatic, like butterfly lighting with a rim light to separate the subject from the background. Skin should be smooth but natural. Critically, the person's face and identity must be perfectly preserved.",
        "Applying Glamour & Beauty preset...",
    ),
    preset(
        "suit-dark",
        "Suit (Dark)",
        Category::Wardrobe,
        "Change the person's outfit into a professional dark-colored business suit. Ensure the result is photorealistic and fits the person's body naturally. Do not change the face, hair, or background.",
        "Adding Formal Suit...",
    ),
    preset(
        "suit-light",
        "Suit (Light)",
        Category::Wardrobe,
        "Change the person's outfit into a professional light-colored (e.g., grey, beige) business suit. Ensure the result is photorealistic and fits the person's body naturally. Do not change the face, hair, or background.",
        "Adding Formal Suit...",
    ),
    preset(
        "blouse",
        "Blouse",
        Category::Wardrobe,
        "Change the person's outfit into a professional and elegant blouse. Ensure the result is photorealistic and fits the person's body naturally. Do not change the face, hair, or background.",
        "Adding Blouse...",
    ),
    preset(
        "polo-shirt",
        "Polo Shirt",
        Category::Wardrobe,
        "Change the person's outfit into a smart casual polo shirt. Ensure the result is photorealistic and fits the person's body naturally. Do not change the face, hair, or background.",
        "Adding Polo Shirt...",
    ),
    preset(
        "turtleneck",
        "Turtleneck",
        Category::Wardrobe,
        "Change the person's outfit into a classy turtleneck sweater. Ensure the result is photorealistic and fits the person's body naturally. Do not change the face, hair, or background.",
        "Adding Turtleneck...",
    ),
    preset(
        "casual-shirt",
        "Casual Shirt",
        Category::Wardrobe,
        "Change the person's outfit into a smart casual button-down shirt. Ensure the result is photorealistic and fits the person's body naturally. Do not change the face, hair, or background.",
        "Adding Casual Shirt...",
    ),
    preset(
        "dress-shirt",
        "Dress Shirt",
        Category::Wardrobe,
        "Change the person's outfit into a crisp, professional dress shirt. Ensure the result is photorealistic and fits the person's body naturally. Do not change the face, hair, or background.",
        "Adding Dress Shirt...",
    ),
    preset(
        "blazer",
        "Blazer",
        Category::Wardrobe,
        "Change the person's outfit to a stylish blazer over a simple top. Ensure the result is photorealistic and fits the person's body naturally. Do not change the face, hair, or background.",
        "Adding Blazer...",
    ),
    preset(
        "v-neck",
        "V-Neck",
        Category::Wardrobe,
        "Change the person's outfit into a smart v-neck sweater. It can be worn over a collared shirt or on its own. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding V-Neck...",
    ),
    preset(
        "cardigan",
        "Cardigan",
        Category::Wardrobe,
        "Change the person's outfit into a comfortable yet professional cardigan sweater over a simple shirt. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Cardigan...",
    ),
    preset(
        "t-shirt",
        "T-Shirt",
        Category::Wardrobe,
        "Change the person's outfit into a simple, high-quality, well-fitting plain t-shirt (e.g., black, white, or gray). The look should be minimalist and modern. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding T-Shirt...",
    ),
    preset(
        "leather-jacket",
        "Leather Jacket",
        Category::Wardrobe,
        "Change the person's outfit into a stylish and modern leather jacket. Ensure the result is photorealistic and looks cool and confident. Do not change the face, hair, or background.",
        "Adding Leather Jacket...",
    ),
    preset(
        "denim-jacket",
        "Denim Jacket",
        Category::Wardrobe,
        "Change the person's outfit into a casual but stylish denim jacket. Perfect for a creative or approachable look. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Denim Jacket...",
    ),
    preset(
        "trench-coat",
        "Trench Coat",
        Category::Wardrobe,
        "Change the person's outfit to be wearing a classic, sophisticated trench coat, either open or closed. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Trench Coat...",
    ),
    preset(
        "add-tie",
        "Add Tie",
        Category::Wardrobe,
        "If the person is wearing a collared shirt, add a professional tie. If they are not, first change the shirt to a dress shirt and then add the tie. The tie should complement the outfit. Do not change the face, hair, or background.",
        "Adding Tie...",
    ),
    preset(
        "add-scarf",
        "Add Scarf",
        Category::Wardrobe,
        "Add a stylish and professional scarf to the person's outfit. The scarf should complement the existing clothing. Ensure the result is photorealistic and looks natural. Do not change the face, hair, or background.",
        "Adding Scarf...",
    ),
    preset(
        "crew-neck",
        "Crew Neck",
        Category::Wardrobe,
        "Change the person's outfit into a classic crew neck sweater. The look should be smart and clean. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Sweater...",
    ),
    preset(
        "hoodie",
        "Hoodie",
        Category::Wardrobe,
        "Change the person's outfit to a stylish, well-fitting hoodie for a modern and casual-tech look. Avoid large logos or graphics. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Hoodie...",
    ),
    preset(
        "pea-coat",
        "Pea Coat",
        Category::Wardrobe,
        "Change the person's outfit to be wearing a classic, sophisticated pea coat. The coat should look professional and warm. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Pea Coat...",
    ),
    preset(
        "bomber-jacket",
        "Bomber Jacket",
        Category::Wardrobe,
        "Change the person's outfit into a modern and stylish bomber jacket. The look should be confident and contemporary. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Bomber Jacket...",
    ),
    preset(
        "vest",
        "Vest",
        Category::Wardrobe,
        "Change the person's outfit to include a smart waistcoat (vest) over a dress shirt. The look should be sharp and professional. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Vest...",
    ),
    preset(
        "bow-tie",
        "Bow Tie",
        Category::Wardrobe,
        "If the person is wearing a collared shirt, add a formal bow tie. If they are not, first change the shirt to a dress shirt and then add the bow tie. The bow tie should be stylish. Do not change the face, hair, or background.",
        "Adding Bow Tie...",
    ),
    preset(
        "henley-shirt",
        "Henley Shirt",
        Category::Wardrobe,
        "Change the person's outfit into a comfortable yet stylish long-sleeve Henley shirt. The look should be casual but put-together. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Henley Shirt...",
    ),
    preset(
        "lab-coat",
        "Lab Coat",
        Category::Wardrobe,
        "Change the person's outfit to a professional white lab coat, worn over simple clothing. The look should be suitable for a scientist or researcher. Ensure the result is photorealistic. Do not change the face, hair, or background.",
        "Adding Lab Coat...",
    ),
    preset(
        "light-gray",
        "Light Gray",
        Category::Background,
        "Replace the background with a solid professional light gray (#e5e7eb). Ensure perfect subject masking and lighting consistency.",
        "Changing Background...",
    ),
    preset(
        "dark-gray",
        "Dark Gray",
        Category::Background,
        "Replace the background with a solid professional dark gray (#374151). Ensure perfect subject masking and lighting consistency.",
        "Changing Background...",
    ),
    preset(
        "navy-blue",
        "Navy Blue",
        Category::Background,
        "Replace the background with a solid professional navy blue (#1e3a8a). Ensure perfect subject masking and lighting consistency.",
        "Changing Background...",
    ),
    preset(
        "studio-red",
        "Studio Red",
        Category::Background,
        "Replace the background with a solid professional studio red (#b91c1c). Ensure perfect subject masking and lighting consistency.",
        "Changing Background...",
    ),
    preset(
        "office",
        "Office",
        Category::Background,
        "Replace the background with a subtly blurred, modern office environment. The subject should be in sharp focus.",
        "Applying Office Background...",
    ),
    preset(
        "studio",
        "Studio",
        Category::Background,
        "Replace the background with a professional photography studio backdrop with a textured gray appearance. The subject should be in sharp focus.",
        "Applying Studio Background...",
    ),
    preset(
        "bookshelf",
        "Bookshelf",
        Category::Background,
        "Replace the background with a well-lit, aesthetically pleasing bookshelf. The books should be softly blurred. The subject should be in sharp focus.",
        "Applying Bookshelf Background...",
    ),
    preset(
        "brick-wall",
        "Brick Wall",
        Category::Background,
        "Replace the background with a stylish, rustic brick wall. The lighting on the wall should match the subject. The subject should be in sharp focus.",
        "Applying Brick Background...",
    ),
    preset(
        "wall-art",
        "Wall Art",
        Category::Background,
        "Replace the background with a minimalist, modern interior wall featuring a single piece of abstract art. The subject should be in sharp focus.",
        "Applying Wall Art Background...",
    ),
    preset(
        "cafe",
        "Cafe",
        Category::Background,
        "Replace the background with the warm, inviting, and softly blurred interior of a modern coffee shop. The subject should be in sharp focus.",
        "Applying Cafe Background...",
    ),
    preset(
        "wood-panel",
        "Wood Panel",
        Category::Background,
        "Replace the background with clean, vertical wooden panels. The lighting should be soft and even. The subject should be in sharp focus.",
        "Applying Wood Background...",
    ),
    preset(
        "gradient",
        "Gradient",
        Category::Background,
        "Replace the background with a smooth, professional studio gradient from a medium blue to a light gray. The subject should be in sharp focus.",
        "Applying Gradient Background...",
    ),
    preset(
        "industrial-loft",
        "Ind. Loft",
        Category::Background,
        "Replace the background with an industrial loft setting, featuring elements like exposed brick and metal pipes, softly blurred. The subject should be in sharp focus.",
        "Applying Loft Background...",
    ),
    preset(
        "minimalist",
        "Minimalist",
        Category::Background,
        "Replace the background with a clean, minimalist white room with simple, elegant architectural details, softly blurred. The subject should be in sharp focus.",
        "Applying Minimalist Background...",
    ),
    preset(
        "passport",
        "Passport/VISA",
        Category::Headshot,
        "Transform this into a formal headshot suitable for a passport or VISA application. The background must be a solid, uniform off-white. The person's expression should be neutral, with eyes open and mouth closed. Lighting should be even, without shadows on the face or background. Do not crop the image, but ensure the head and shoulders are clearly visible.",
        "Creating Document Photo...",
    ),
    preset(
        "smooth-skin",
        "Smooth Skin",
        Category::Face,
        "Subtly smooth the skin while preserving natural texture. Do not alter other facial features.",
        "Applying Skin Smoothing...",
    ),
    preset(
        "brighten-eyes",
        "Brighten Eyes",
        Category::Face,
        "Slightly brighten the eyes and enhance their clarity to make them gently pop.",
        "Brightening Eyes...",
    ),
    preset(
        "whiten-teeth",
        "Whiten Teeth",
        Category::Face,
        "Gently whiten the teeth to a natural, healthy shade.",
        "Whitening Teeth...",
    ),
    preset(
        "remove-blemish",
        "Remove Blemish",
        Category::Face,
        "Remove minor blemishes, stray hairs, and skin imperfections.",
        "Removing Blemishes...",
    ),
    preset(
        "refine-hair",
        "Refine Hair",
        Category::Face,
        "Subtly refine the person's hair to look neater and more styled. Tidy up stray hairs and add a slight, healthy sheen.",
        "Refining Hair...",
    ),
    preset(
        "rembrandt",
        "Rembrandt",
        Category::Lighting,
        "Re-light the subject using Rembrandt lighting. This should create a distinct triangle of light on the cheek that is in shadow. The effect should be dramatic and add depth.",
        "Applying Rembrandt Light...",
    ),
    preset(
        "butterfly",
        "Butterfly",
        Category::Lighting,
        "Re-light the subject using Butterfly lighting, also known as Paramount lighting. This should create a symmetrical, butterfly-shaped shadow directly under the nose. The overall effect should be glamorous and flattering.",
        "Applying Butterfly Light...",
    ),
    preset(
        "split",
        "Split",
        Category::Lighting,
        "Re-light the subject using Split lighting. Exactly half of the face should be illuminated, while the other half is in shadow, creating a strong line down the center of the face for a very dramatic effect.",
        "Applying Split Light...",
    ),
    preset(
        "loop",
        "Loop",
        Category::Lighting,
        "Re-light the subject using Loop lighting. This should create a small 'loop' of shadow from the nose on the cheek. It should be less dramatic than split lighting but more defined than flat lighting.",
        "Applying Loop Light...",
    ),
    preset(
        "rim-light",
        "Rim Light",
        Category::Lighting,
        "Add a strong backlight to create a 'rim' of light around the subject's hair and shoulders. This will help separate them from the background and add a professional, dramatic outline.",
        "Adding Rim Light...",
    ),
    preset(
        "bright-vibrant",
        "Bright & Vibrant",
        Category::Lighting,
        "Make the lighting brighter and more vibrant, as if in a well-lit professional studio.",
        "Applying Bright Light...",
    ),
    preset(
        "soft-diffused",
        "Soft & Diffused",
        Category::Lighting,
        "Soften the lighting and reduce harsh shadows for a more flattering, gentle appearance.",
        "Applying Soft Light...",
    ),
    preset(
        "turn-left",
        "Turn Left",
        Category::Pose,
        "Subtly alter the person's pose. Turn their head slightly to their left (from the viewer's perspective). The change should be minimal and look natural. Do not change their identity, expression, clothing, or the background.",
        "Adjusting Pose...",
    ),
    preset(
        "turn-right",
        "Turn Right",
        Category::Pose,
        "Subtly alter the person's pose. Turn their head slightly to their right (from the viewer's perspective). The change should be minimal and look natural. Do not change their identity, expression, clothing, or the background.",
        "Adjusting Pose...",
    ),
    preset(
        "slight-smile",
        "Slight Smile",
        Category::Pose,
        "Subtly alter the person's expression to a gentle, closed-mouth smile. The change should be minor and look authentic. Do not change their identity, pose, clothing, or the background.",
        "Adjusting Expression...",
    ),
    preset(
        "remove-wrinkles",
        "Remove Wrinkles & Sharpen",
        Category::Wardrobe,
        "Make minor refinements to the person's clothing. Remove small wrinkles and slightly sharpen fabric details to look neater.",
        "Refining Outfit...",
    ),
];

pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static Preset> {
    PRESETS.iter().filter(move |p| p.category == category)
}

/// Instruction and progress text for the colour-temperature tool.
///
/// The value is clamped into the tool's range.
pub fn color_temperature(kelvin: u32) -> (String, String) {
    let kelvin = kelvin.clamp(KELVIN_MIN, KELVIN_MAX);
    (
        format!(
            "Adjust the lighting color temperature to approximately {}K. A lower value should be warmer (more orange/yellow) and a higher value should be cooler (more blue).",
            kelvin
        ),
        format!("Adjusting light to {}K...", kelvin),
    )
}

/// Compass direction for a key-light angle, 0° at the top, clockwise
pub fn light_direction(degrees: f64) -> &'static str {
    let angle = degrees.rem_euclid(360.0);
    const SECTORS: [&str; 8] = [
        "from the top",
        "from the top-right",
        "from the right",
        "from the bottom-right",
        "from the bottom",
        "from the bottom-left",
        "from the left",
        "from the top-left",
    ];
    let index = (((angle + 22.5) / 45.0).floor() as usize) % SECTORS.len();
    SECTORS[index]
}

/// Instruction and progress text for the key-light direction tool
pub fn key_light(degrees: f64) -> (String, String) {
    let angle = degrees.rem_euclid(360.0).round() as u32 % 360;
    (
        format!(
            "Change the main light source (the key light) to be positioned {} relative to the subject. This should illuminate that side of their face more brightly and create soft shadows on the opposite side.",
            light_direction(degrees)
        ),
        format!("Adjusting key light to {}°...", angle),
    )
}
