mod bot;
mod users;
