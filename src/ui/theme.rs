use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub warning: Color,   // Yellow
    pub number: Color,
    pub string: Color,
    pub register: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub base_pointer_tag: Color,  // Background of the %ebp tag
    pub stack_pointer_tag: Color, // Background of the %esp tag
    pub saved_base_pointer: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    warning: Color::Rgb(249, 226, 175),
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    string: Color::Rgb(205, 214, 244),         // Plain text values
    register: Color::Rgb(148, 226, 213),       // Cyan/teal for registers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for bars
    base_pointer_tag: Color::Rgb(203, 166, 247), // Mauve
    stack_pointer_tag: Color::Rgb(166, 227, 161), // Green
    saved_base_pointer: Color::Rgb(245, 194, 231), // Pink for saved %ebp slots
};
