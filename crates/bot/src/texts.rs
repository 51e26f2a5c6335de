//! User-facing message strings, kept together so the wording stays
//! consistent across flows.

pub const GREETING_ASK_FIRST_NAME: &str = "Hi! Let's get you registered. Your first name:";
pub const ASK_LAST_NAME: &str = "Your last name:";
pub const ASK_NICK: &str = "Your nick (how to caption you in the championship):";
pub const PICK_TEAM_FOR_REGISTRATION: &str = "Pick a team or create a new one:";
pub const PICK_TEAM: &str = "Pick a team:";
pub const CREATE_TEAM_BUTTON: &str = "➕ Create new";
pub const ASK_TEAM_NAME: &str = "Name of the new team:";
pub const TEAM_NAME_EMPTY: &str = "The name cannot be empty. Try again:";
pub const REGISTRATION_DONE: &str = "✅ Registration complete! Press /start";
pub const PRESS_START: &str = "Press /start";
pub const NOT_REGISTERED_YET: &str = "You are not registered yet. Press /start";
pub const ACCESS_DENIED: &str = "Access denied.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again later.";

pub const STAGE_NOT_FOUND: &str = "Stage not found.";
pub const REGISTRATION_CLOSED: &str = "Registration for this stage is closed.";
pub const ALREADY_REGISTERED: &str = "You are already registered for this stage.";

pub const JOINED_AS_MAIN: &str =
    "✅ You're in!\nRole: main\nNow pay the entry fee to lock your spot.";
pub const JOINED_AS_RESERVE: &str = "✅ You're in. ⚠️ You joined as a reserve: your team \
     already has 3 main pilots. You can pay now; racing depends on a spot opening up.";
pub const PAY_BUTTON: &str = "💳 Pay";
pub const PAYMENT_CONFIRMED: &str = "✅ Payment confirmed. Your spot in the stage is locked in.";
pub const PAYMENT_CANCELLED: &str = "❌ Payment cancelled.";

pub const NO_OPEN_STAGES: &str = "No stages with open registration right now.";
pub const NO_STAGES: &str = "No stages yet.";
pub const NO_RESULTS: &str = "No results for this stage yet.";
pub const NO_PHOTO: &str = "No photo for this stage yet.";
pub const PICK_STAGE_FOR_RESULTS: &str = "Pick a stage for results:";
pub const PICK_STAGE_FOR_PHOTOS: &str = "Pick a stage for photos:";

pub const ADMIN_MENU_TITLE: &str = "🛠 Admin panel";
pub const ASK_STAGE_ID: &str = "Creating a stage. Enter a stage id (e.g. 1 or st1):";
pub const STAGE_ID_EMPTY: &str = "The stage id is empty. Try again:";
pub const ASK_STAGE_TITLE: &str = "Stage title:";
pub const ASK_STAGE_DATE: &str = "Date (e.g. 2026-03-10):";
pub const ASK_STAGE_TIME: &str = "Time (e.g. 18:00):";
pub const ASK_STAGE_PLACE: &str = "Place (club/track):";
pub const ASK_STAGE_ADDRESS: &str = "Address (a maps link works too):";
pub const ASK_STAGE_PRICE: &str = "Price (a number, e.g. 1500):";
pub const STAGE_CREATED: &str =
    "✅ Stage created. Registration is closed by default. Press /admin";

pub const ASK_BROADCAST_TEXT: &str =
    "Broadcast. Enter the message text (it goes to every registered participant):";
pub const BROADCAST_TEXT_EMPTY: &str = "The text is empty. Try again:";
pub const BROADCAST_PREFIX: &str = "📢 Message from the organizers: ";
