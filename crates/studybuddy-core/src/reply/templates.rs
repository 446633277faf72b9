//! Fixed reply templates.
//!
//! Each template only interpolates the student's name.

pub(super) const LOOP_PHRASES: [&str; 2] = ["Could you tell me more", "What have you tried so far"];

pub fn welcome(name: &str) -> String {
    format!("Hi {name}! 👋 I'm your AI homework assistant. What would you like help with today?")
}

pub fn hint(name: &str) -> String {
    format!(
        "Here's a hint, {name}: Remember to break down the problem into smaller parts. What's the first step you think we should take?"
    )
}

pub(super) fn redirect(name: &str) -> String {
    format!(
        "Let's try something different, {name}! 🌟 Instead of talking about it, let's jump into an activity.\n\n\
         You can ask me things like:\n\
         • \"Give me a practice exercise with numbers 1-5\"\n\
         • \"I want to learn numbers\"\n\
         • \"Give me a math activity\"\n\n\
         Which one sounds fun to you?"
    )
}

pub(super) fn numbers_one_to_five_exercise(name: &str) -> String {
    format!(
        "Great choice, {name}! Here are three exercises with the numbers 1 to 5:\n\n\
         Exercise 1: Count and clap 👏\n\
         Say each number out loud and clap once for every number: 1, 2, 3, 4, 5.\n\n\
         Exercise 2: Find the missing number 🔍\n\
         1, 2, __, 4, 5. Which number is hiding?\n\n\
         Exercise 3: Count the stars ⭐\n\
         ⭐⭐⭐⭐\n\
         How many stars can you count?\n\n\
         Which exercise would you like to try first?"
    )
}

pub(super) fn numbers_one_to_ten_exercise(name: &str) -> String {
    format!(
        "Let's practice counting, {name}! 🔢\n\n\
         Exercise 1: Count from 1 to 10 out loud, touching a finger for each number.\n\n\
         Exercise 2: Count backwards from 10 to 1, like a rocket launch! 🚀\n\n\
         Exercise 3: What number comes after 6? What number comes before 9?\n\n\
         Tell me your answers when you're ready!"
    )
}

pub(super) fn math_exercise(name: &str) -> String {
    format!(
        "Here's a math activity for you, {name}! ➕➖\n\n\
         1. If you have 2 pencils and get 1 more, how many pencils do you have?\n\
         2. If you have 5 cookies and eat 2, how many are left?\n\
         3. What is 3 + 3?\n\n\
         Take your time and draw pictures if it helps. What did you get for the first one?"
    )
}

pub(super) fn generic_exercise(name: &str) -> String {
    format!(
        "I love that you want to practice, {name}! 🎯\n\n\
         I can make exercises about:\n\
         • Numbers and counting (like 1-5 or 1-10)\n\
         • Math (addition and subtraction)\n\n\
         Which topic would you like to practice?"
    )
}

pub(super) fn counting_lesson(name: &str) -> String {
    format!(
        "Let's learn to count from 1 to 10, {name}! 🎉\n\n\
         1 - one 🍎\n\
         2 - two 🍎🍎\n\
         3 - three 🍎🍎🍎\n\
         4 - four 🍎🍎🍎🍎\n\
         5 - five 🍎🍎🍎🍎🍎\n\
         6 - six\n\
         7 - seven\n\
         8 - eight\n\
         9 - nine\n\
         10 - ten\n\n\
         Can you say them with me, one at a time?"
    )
}

pub(super) fn apple_counting(name: &str) -> String {
    format!(
        "Hi {name}! Counting is fun! Let's use some pictures to help. 🍎🍎🍎 How many apples do you see? Count them one by one, pointing at each apple as you count. Take your time!"
    )
}

pub(super) fn apple_correct(name: &str) -> String {
    format!(
        "Yes, {name}! 🎉 That's right, there are 3 apples! You counted them perfectly. Would you like to try counting something else?"
    )
}

pub(super) fn apple_try_again(name: &str) -> String {
    format!(
        "Good try, {name}! Let's count together, pointing at each apple: 🍎 one, 🍎 two, 🍎 three. How many apples are there?"
    )
}

pub(super) fn addition_groups(name: &str) -> String {
    format!(
        "Hi {name}! Let's think about addition like putting groups together. If you have 2 toys and get 3 more toys, you can count all the toys to find out how many you have now. Can you try drawing the toys and counting them?"
    )
}

pub(super) fn fractions(name: &str) -> String {
    format!(
        "Hey {name}! Fractions represent parts of a whole. Think of a pizza cut into 8 slices - each slice is 1/8 of the whole pizza. When you're adding or subtracting fractions, they need to have the same denominator (the bottom number). Would you like me to explain how to find a common denominator?"
    )
}

pub(super) fn equations(name: &str) -> String {
    format!(
        "Hi {name}! When solving equations, think of them like balanced scales. Whatever you do to one side, you must do to the other. Try isolating the variable by moving everything else to the opposite side. What equation are you working with?"
    )
}

pub(super) fn quadratics(name: &str) -> String {
    format!(
        "Hi {name}! For quadratic equations, remember the formula: x = (-b ± √(b² - 4ac)) / 2a where ax² + bx + c = 0. First, identify your a, b, and c values, then plug them into the formula. Would you like to try an example together?"
    )
}

pub(super) fn derivatives(name: &str) -> String {
    format!(
        "Hey {name}! When finding derivatives, you're looking for the rate of change of a function. For a function f(x) = x², the derivative f'(x) = 2x. What function are you trying to find the derivative of?"
    )
}

pub(super) fn calculus(name: &str) -> String {
    format!(
        "Hi {name}! In calculus, we're often looking at rates of change or accumulation. For integration, remember it's the opposite of differentiation - you're finding the area under a curve. What specific calculus problem are you working on?"
    )
}

pub(super) fn physics(name: &str) -> String {
    format!(
        "Hey {name}! Physics problems often require identifying the relevant principles first. For mechanics problems, start with drawing a free body diagram to visualize all forces. What physics concept are you studying?"
    )
}

pub(super) fn generic_prompts(name: &str) -> [String; 4] {
    [
        format!(
            "Hi {name}! I'd be happy to help with your homework. Could you tell me more about what you're working on?"
        ),
        format!(
            "Hey {name}! Let's figure this out together. Can you share the specific question or problem you're trying to solve?"
        ),
        format!(
            "Hello {name}! I'm here to guide you, not just give answers. What part of this problem is challenging for you?"
        ),
        format!(
            "Hi {name}! Learning works best when we break problems down into steps. What have you tried so far?"
        ),
    ]
}
